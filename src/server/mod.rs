//! Web server for the portfolio site.
//!
//! Serves the single-page portfolio with:
//! - A server-rendered page (hero, about, experience, portfolio, contact)
//! - One live carousel per gallery category, driven by a JSON API
//! - The CV as an inline PDF
//! - Gallery images from the public directory

mod assets;
mod handlers;
mod routes;
mod template_structs;

pub use handlers::{read_asset, AssetError, JumpRequest, ScrollReport, SectionReport};
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::carousel::{CarouselError, Scheduler, TokioScheduler};
use crate::config::Settings;
use crate::gallery::{Gallery, PROJECTS};
use crate::sections::{ScrollSpy, SectionBounds};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub gallery: Arc<Gallery>,
    /// Current navigation section. Only the scroll report handler writes it.
    scroll_spy: Arc<Mutex<ScrollSpy>>,
}

impl AppState {
    /// Mount the gallery carousels using `scheduler` for their timers.
    pub fn new(settings: Settings, scheduler: Arc<dyn Scheduler>) -> Result<Self, CarouselError> {
        let gallery = Gallery::new(PROJECTS, scheduler, settings.slide_interval())?;
        Ok(Self {
            settings: Arc::new(settings),
            gallery: Arc::new(gallery),
            scroll_spy: Arc::new(Mutex::new(ScrollSpy::default())),
        })
    }

    pub fn current_section(&self) -> String {
        self.scroll_spy().current().to_string()
    }

    /// Feed a scroll position into the spy. Returns the current section and
    /// whether it changed.
    pub(crate) fn record_scroll(
        &self,
        scroll_y: f64,
        sections: &[SectionBounds<'_>],
    ) -> (String, bool) {
        let mut spy = self.scroll_spy();
        let changed = spy.on_scroll(scroll_y, sections);
        if changed {
            tracing::debug!(section = spy.current(), "active section changed");
        }
        (spy.current().to_string(), changed)
    }

    fn scroll_spy(&self) -> MutexGuard<'_, ScrollSpy> {
        self.scroll_spy.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Start the web server and run until Ctrl+C.
///
/// Every carousel timer is released before this returns.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings.clone(), Arc::new(TokioScheduler))?;
    let gallery = Arc::clone(&state.gallery);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    gallery.stop_all();
    result?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
