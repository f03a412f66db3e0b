//! Portfolio site for a digital artist.
//!
//! A single-page portfolio served over HTTP. Each gallery category owns an
//! image [`carousel::Carousel`] that advances on its own timer and can be
//! driven manually through a small JSON API. The artist's CV is served
//! inline as a PDF.

pub mod carousel;
pub mod cli;
pub mod config;
pub mod gallery;
pub mod sections;
pub mod server;
