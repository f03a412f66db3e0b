//! HTTP request handlers for the web server.

mod cv;
mod gallery_api;
mod pages;
mod scroll;
mod static_files;

// Re-export handlers for use by the router
pub use cv::{read_asset, serve_cv, AssetError};
pub use gallery_api::{
    api_gallery, api_gallery_entry, api_gallery_jump, api_gallery_next, api_gallery_previous,
    JumpRequest,
};
pub use pages::index;
pub use scroll::{api_scroll, api_section, ScrollReport, SectionReport};
pub use static_files::{health, serve_css, serve_js, serve_resource};
