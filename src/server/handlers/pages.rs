//! HTML page handlers.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{Datelike, Utc};

use super::super::template_structs::{IndexTemplate, NavLink, ProjectCard};
use super::super::AppState;
use crate::sections::{CONTACT, EDUCATION, EXPERIENCE, NAV_ITEMS, SKILLS, SPECIALTIES};

const ARTIST: &str = "Michelle";

/// Render the single-page portfolio with each carousel at its current image.
pub async fn index(State(state): State<AppState>) -> Response {
    let current_section = state.current_section();

    let template = IndexTemplate {
        title: "Michelle | Artista Digital",
        artist: ARTIST,
        about_image: "/resources/personaje_prop.png",
        cv_href: "/cv",
        nav: NAV_ITEMS
            .iter()
            .map(|item| NavLink::new(item, &current_section))
            .collect(),
        skills: SKILLS,
        experience: EXPERIENCE,
        education: EDUCATION,
        specialties: SPECIALTIES,
        projects: ProjectCard::from_gallery(&state.gallery),
        interval_ms: state.settings.slide_interval_ms,
        contact: CONTACT,
        year: Utc::now().year(),
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", e),
            )
                .into_response()
        }
    }
}
