//! Page sections, profile content, and scroll-spy.

/// Offset added to the scroll position before matching sections, so a
/// section counts as current slightly before its top reaches the viewport.
pub const SCROLL_PROBE_OFFSET: f64 = 100.0;

/// Section the page opens on.
pub const INITIAL_SECTION: &str = "inicio";

/// Navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
}

impl NavItem {
    pub fn href(&self) -> String {
        section_href(self.id)
    }
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        id: "inicio",
        label: "Inicio",
    },
    NavItem {
        id: "sobre-mi",
        label: "Sobre Mí",
    },
    NavItem {
        id: "experiencia",
        label: "Experiencia",
    },
    NavItem {
        id: "portafolio",
        label: "Portafolio",
    },
    NavItem {
        id: "contacto",
        label: "Contacto",
    },
];

pub fn section_href(id: &str) -> String {
    format!("#{}", id)
}

/// Tool proficiency, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub level: u8,
}

pub const SKILLS: &[Skill] = &[
    Skill {
        name: "Blender",
        level: 70,
    },
    Skill {
        name: "Photoshop",
        level: 70,
    },
    Skill {
        name: "Krita",
        level: 60,
    },
];

/// Timeline entry in the experience section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub period: &'static str,
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

pub const EXPERIENCE: &[TimelineEntry] = &[
    TimelineEntry {
        period: "Mar 2024 - Jul 2024",
        title: "Animadora 2D",
        lines: &[
            "Diseño de escenarios para el teaser animado \"El son de la bruja\"",
            "Animación rough para escenas del teaser",
        ],
    },
    TimelineEntry {
        period: "Sep 2024 - Dic 2024",
        title: "Modeladora 3D",
        lines: &[
            "Desarrollo de modelo 3D del campus del Tecnológico de Estudios Superiores de Jocotitlán",
            "Incluyendo edificios e infraestructura para integración en un mapa interactivo",
        ],
    },
    TimelineEntry {
        period: "Abril 2025",
        title: "Diseño de Personajes",
        lines: &["Diseño y concept art de personajes para el teaser \"El eco del silencio\""],
    },
];

pub const EDUCATION: &[TimelineEntry] = &[TimelineEntry {
    period: "2021 - Actualidad",
    title: "Tecnológico de Estudios Superiores de Jocotitlán",
    lines: &[
        "Ingeniería en Animación Digital y Efectos Visuales",
        "Formación integral en técnicas de animación 2D y 3D, modelado, texturizado, \
         iluminación, y efectos visuales.",
    ],
}];

pub const SPECIALTIES: &[&str] = &["Animación 2D", "Modelado 3D", "Concept Art"];

/// Contact details shown in the contact section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub email: &'static str,
    pub location: &'static str,
}

pub const CONTACT: Contact = Contact {
    email: "perlamichmr@gmail.com",
    location: "Ixtlahuaca, Edo. México",
};

/// Vertical extent of a rendered section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds<'a> {
    pub id: &'a str,
    pub offset_top: f64,
    pub offset_height: f64,
}

impl SectionBounds<'_> {
    fn contains(&self, position: f64) -> bool {
        position >= self.offset_top && position < self.offset_top + self.offset_height
    }
}

/// Section under the scroll probe, if any.
///
/// Sections are checked in table order and the last match wins, so an
/// overlapping later section takes precedence.
pub fn active_section<'a>(scroll_y: f64, sections: &[SectionBounds<'a>]) -> Option<&'a str> {
    let probe = scroll_y + SCROLL_PROBE_OFFSET;
    sections.iter().rev().find(|s| s.contains(probe)).map(|s| s.id)
}

/// Tracks the current navigation section.
///
/// [`ScrollSpy::on_scroll`] is the only writer; a scroll position outside
/// every section keeps the previous value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollSpy {
    current: String,
}

impl Default for ScrollSpy {
    fn default() -> Self {
        Self {
            current: INITIAL_SECTION.to_string(),
        }
    }
}

impl ScrollSpy {
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Recompute the current section. Returns true if it changed.
    pub fn on_scroll(&mut self, scroll_y: f64, sections: &[SectionBounds<'_>]) -> bool {
        match active_section(scroll_y, sections) {
            Some(id) if id != self.current => {
                self.current = id.to_string();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<SectionBounds<'static>> {
        vec![
            SectionBounds {
                id: "inicio",
                offset_top: 0.0,
                offset_height: 800.0,
            },
            SectionBounds {
                id: "sobre-mi",
                offset_top: 800.0,
                offset_height: 600.0,
            },
            SectionBounds {
                id: "experiencia",
                offset_top: 1400.0,
                offset_height: 900.0,
            },
        ]
    }

    #[test]
    fn test_probe_offset_applied() {
        let sections = layout();
        assert_eq!(active_section(0.0, &sections), Some("inicio"));
        assert_eq!(active_section(699.0, &sections), Some("inicio"));
        assert_eq!(active_section(700.0, &sections), Some("sobre-mi"));
    }

    #[test]
    fn test_bottom_edge_exclusive() {
        let sections = layout();
        assert_eq!(active_section(1299.5, &sections), Some("sobre-mi"));
        assert_eq!(active_section(1300.0, &sections), Some("experiencia"));
    }

    #[test]
    fn test_last_match_wins_on_overlap() {
        let sections = vec![
            SectionBounds {
                id: "a",
                offset_top: 0.0,
                offset_height: 1000.0,
            },
            SectionBounds {
                id: "b",
                offset_top: 200.0,
                offset_height: 100.0,
            },
        ];
        assert_eq!(active_section(150.0, &sections), Some("b"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(active_section(5000.0, &layout()), None);
        assert_eq!(active_section(0.0, &[]), None);
    }

    #[test]
    fn test_scroll_spy_keeps_previous_outside_sections() {
        let sections = layout();
        let mut spy = ScrollSpy::default();
        assert_eq!(spy.current(), "inicio");

        assert!(spy.on_scroll(1500.0, &sections));
        assert_eq!(spy.current(), "experiencia");

        assert!(!spy.on_scroll(9000.0, &sections));
        assert_eq!(spy.current(), "experiencia");

        assert!(!spy.on_scroll(1600.0, &sections));
    }

    #[test]
    fn test_nav_hrefs() {
        let hrefs: Vec<String> = NAV_ITEMS.iter().map(NavItem::href).collect();
        assert_eq!(hrefs[0], "#inicio");
        assert_eq!(hrefs[3], "#portafolio");
    }

    #[test]
    fn test_skill_levels_are_percentages() {
        assert!(SKILLS.iter().all(|s| s.level <= 100));
    }
}
