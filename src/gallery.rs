//! Portfolio gallery: the static project table and one carousel per project.

use std::sync::Arc;
use std::time::Duration;

use crate::carousel::{Carousel, CarouselError, CarouselSnapshot, Scheduler};

/// A portfolio category as shown in the gallery grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    /// URL-safe identifier used by the JSON API.
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Badge label.
    pub category: &'static str,
    /// Image references, relative to the site root.
    pub images: &'static [&'static str],
}

/// Projects shown on the portfolio page, in display order.
pub const PROJECTS: &[Project] = &[
    Project {
        slug: "ilustraciones-2d",
        title: "Ilustraciones 2D",
        description: "Colección de ilustraciones digitales con estilo único",
        category: "Ilustración",
        images: &[
            "/resources/background_final.png",
            "/resources/ilustracion.jpg",
            "/resources/Lucy_ilust.png",
            "/resources/proyecto_segunda_luz_natural.png",
        ],
    },
    Project {
        slug: "diseno-de-personajes",
        title: "Diseño de Personajes",
        description: "Desarrollo completo de personajes para animación",
        category: "Personajes",
        images: &[
            "/resources/ANNA_TURN_AROUND.png",
            "/resources/DON ESTEBAN_TURNAROUND.png",
            "/resources/EMILIANO_TURNAROUND.png",
            "/resources/IGNACIO_TURNAROUND.png",
            "/resources/LUCY_TURN_AROUND.png",
            "/resources/personaje_turn_around.png",
        ],
    },
    Project {
        slug: "modelado-3d",
        title: "Modelado 3D",
        description: "Modelos arquitectónicos y productos en 3D",
        category: "3D",
        images: &[
            "/resources/BIBLIOTECA.png",
            "/resources/bodegon.png",
            "/resources/danup.png",
            "/resources/GYM.png",
            "/resources/I.png",
            "/resources/K.png",
        ],
    },
];

/// Percent-encode each path segment of an image reference so names with
/// spaces survive as `src` attributes.
pub fn image_src(reference: &str) -> String {
    reference
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// A project paired with its running carousel.
#[derive(Debug)]
pub struct GalleryEntry {
    pub project: Project,
    pub carousel: Carousel,
}

impl GalleryEntry {
    /// Whether the page should render slider controls for this project.
    pub fn has_slider(&self) -> bool {
        self.carousel.item_count() > 1
    }
}

/// All gallery carousels, one per project.
#[derive(Debug)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    /// Build and start a carousel for every project.
    pub fn new(
        projects: &[Project],
        scheduler: Arc<dyn Scheduler>,
        interval: Duration,
    ) -> Result<Self, CarouselError> {
        let entries = projects
            .iter()
            .map(|project| {
                let images = project.images.iter().map(|s| s.to_string()).collect();
                let carousel =
                    Carousel::with_interval(images, project.title, Arc::clone(&scheduler), interval)?;
                Ok(GalleryEntry {
                    project: *project,
                    carousel,
                })
            })
            .collect::<Result<Vec<_>, CarouselError>>()?;

        tracing::info!(carousels = entries.len(), "gallery mounted");
        Ok(Self { entries })
    }

    pub fn get(&self, slug: &str) -> Option<&GalleryEntry> {
        self.entries.iter().find(|e| e.project.slug == slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GalleryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot every carousel, in display order.
    pub fn snapshots(&self) -> Vec<GallerySnapshot> {
        self.entries.iter().map(GallerySnapshot::from_entry).collect()
    }

    /// Release every carousel timer. Called when the site shuts down.
    pub fn stop_all(&self) {
        for entry in &self.entries {
            entry.carousel.stop();
        }
        tracing::info!("gallery unmounted");
    }
}

/// JSON view of one gallery entry.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GallerySnapshot {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    #[serde(flatten)]
    pub carousel: CarouselSnapshot,
}

impl GallerySnapshot {
    pub fn from_entry(entry: &GalleryEntry) -> Self {
        Self {
            slug: entry.project.slug,
            title: entry.project.title,
            description: entry.project.description,
            category: entry.project.category,
            carousel: entry.carousel.snapshot(),
        }
    }
}
