//! Static asset constants (CSS and JavaScript).

/// Stylesheet for the portfolio page.
pub const CSS: &str = include_str!("styles.css");

/// Carousel controls and server sync.
pub const JS: &str = include_str!("carousel.js");
