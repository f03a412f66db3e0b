//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/cv", get(handlers::serve_cv))
        .route("/health", get(handlers::health))
        // Gallery images
        .route("/resources/*path", get(handlers::serve_resource))
        // Carousel API
        .route("/api/gallery", get(handlers::api_gallery))
        .route("/api/gallery/:slug", get(handlers::api_gallery_entry))
        .route("/api/gallery/:slug/next", post(handlers::api_gallery_next))
        .route(
            "/api/gallery/:slug/previous",
            post(handlers::api_gallery_previous),
        )
        .route("/api/gallery/:slug/jump", post(handlers::api_gallery_jump))
        // Navigation scroll-spy
        .route(
            "/api/section",
            get(handlers::api_section).post(handlers::api_scroll),
        )
        // Static assets (CSS/JS)
        .route("/static/style.css", get(handlers::serve_css))
        .route("/static/carousel.js", get(handlers::serve_js))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
