//! Navigation scroll-spy API.

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use super::super::AppState;
use crate::sections::{SectionBounds, NAV_ITEMS};

/// Layout of one section as measured by the browser.
#[derive(Debug, Deserialize)]
pub struct SectionReport {
    pub id: String,
    pub offset_top: f64,
    pub offset_height: f64,
}

/// Scroll position plus the section layout it was measured against.
#[derive(Debug, Deserialize)]
pub struct ScrollReport {
    pub scroll_y: f64,
    #[serde(default)]
    pub sections: Vec<SectionReport>,
}

#[derive(Debug, Serialize)]
struct SectionResponse {
    current: String,
    changed: bool,
}

/// Current navigation section.
pub async fn api_section(State(state): State<AppState>) -> impl IntoResponse {
    Json(SectionResponse {
        current: state.current_section(),
        changed: false,
    })
}

/// Record a scroll event and return the resulting section.
///
/// Sections that are not navigation targets are ignored.
pub async fn api_scroll(
    State(state): State<AppState>,
    Json(report): Json<ScrollReport>,
) -> impl IntoResponse {
    let bounds: Vec<SectionBounds<'_>> = report
        .sections
        .iter()
        .filter(|s| NAV_ITEMS.iter().any(|item| item.id == s.id))
        .map(|s| SectionBounds {
            id: &s.id,
            offset_top: s.offset_top,
            offset_height: s.offset_height,
        })
        .collect();

    let (current, changed) = state.record_scroll(report.scroll_y, &bounds);
    Json(SectionResponse { current, changed })
}
