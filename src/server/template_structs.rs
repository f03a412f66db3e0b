//! Askama template structs for the web interface.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.
//! Askama provides compile-time verification that templates are valid.

use askama::Template;

use crate::gallery::{image_src, Gallery, GalleryEntry};
use crate::sections::{Contact, NavItem, Skill, TimelineEntry};

/// Helper struct for navigation links.
pub struct NavLink {
    pub id: &'static str,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

impl NavLink {
    pub fn new(item: &NavItem, current: &str) -> Self {
        Self {
            id: item.id,
            label: item.label,
            href: item.href(),
            active: item.id == current,
        }
    }
}

/// Helper struct for one carousel image.
pub struct SlideView {
    pub index: usize,
    pub src: String,
    pub alt: String,
    pub active: bool,
}

/// Helper struct for a portfolio card.
pub struct ProjectCard {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub has_slider: bool,
    pub slides: Vec<SlideView>,
}

impl ProjectCard {
    pub fn from_entry(entry: &GalleryEntry) -> Self {
        let snapshot = entry.carousel.snapshot();
        let slides = snapshot
            .slides
            .into_iter()
            .enumerate()
            .map(|(index, slide)| SlideView {
                index,
                src: image_src(&slide.src),
                alt: slide.alt,
                active: slide.active,
            })
            .collect();

        Self {
            slug: entry.project.slug,
            title: entry.project.title,
            description: entry.project.description,
            category: entry.project.category,
            has_slider: entry.has_slider(),
            slides,
        }
    }

    pub fn from_gallery(gallery: &Gallery) -> Vec<Self> {
        gallery.iter().map(Self::from_entry).collect()
    }
}

/// Portfolio landing page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub about_image: &'a str,
    pub cv_href: &'a str,
    pub nav: Vec<NavLink>,
    pub skills: &'a [Skill],
    pub experience: &'a [TimelineEntry],
    pub education: &'a [TimelineEntry],
    pub specialties: &'a [&'a str],
    pub projects: Vec<ProjectCard>,
    pub interval_ms: u64,
    pub contact: Contact,
    pub year: i32,
}
