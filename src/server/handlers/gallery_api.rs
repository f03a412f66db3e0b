//! Carousel JSON API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::super::AppState;
use crate::carousel::Carousel;
use crate::gallery::{GalleryEntry, GallerySnapshot};

/// Body for the jump endpoint. Signed so negative input is reported as an
/// invalid index rather than a parse failure.
#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    pub index: i64,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Run `op` against the carousel for `slug` and return its new snapshot.
fn with_entry<F>(state: &AppState, slug: &str, op: F) -> Response
where
    F: FnOnce(&Carousel) -> Result<(), Response>,
{
    let Some(entry) = state.gallery.get(slug) else {
        return error_response(StatusCode::NOT_FOUND, format!("Unknown gallery: {}", slug));
    };

    match op(&entry.carousel) {
        Ok(()) => snapshot_response(entry),
        Err(response) => response,
    }
}

fn snapshot_response(entry: &GalleryEntry) -> Response {
    Json(GallerySnapshot::from_entry(entry)).into_response()
}

/// List every carousel.
pub async fn api_gallery(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.gallery.snapshots())
}

/// Current state of one carousel.
pub async fn api_gallery_entry(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    with_entry(&state, &slug, |_| Ok(()))
}

pub async fn api_gallery_next(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    with_entry(&state, &slug, |carousel| {
        carousel.next();
        Ok(())
    })
}

pub async fn api_gallery_previous(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    with_entry(&state, &slug, |carousel| {
        carousel.previous();
        Ok(())
    })
}

/// Jump to an indicator. Out-of-range indices get a 400 and leave the
/// carousel untouched. An unknown slug is reported before a bad body.
pub async fn api_gallery_jump(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    request: Result<Json<JumpRequest>, JsonRejection>,
) -> Response {
    with_entry(&state, &slug, |carousel| {
        let Json(request) =
            request.map_err(|e| error_response(e.status(), e.body_text()))?;
        carousel
            .jump_to_signed(request.index)
            .map(|_| ())
            .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))
    })
}
