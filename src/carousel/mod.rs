//! Image carousel controller.
//!
//! A [`Carousel`] owns a cursor over a fixed, non-empty list of image
//! references and a recurring timer that advances the cursor once per
//! interval. Manual navigation ([`Carousel::next`], [`Carousel::previous`],
//! [`Carousel::jump_to`]) mutates the same cursor and never touches the
//! timer's phase; the two simply compose through the shared index.
//!
//! The timer is acquired from an injected [`Scheduler`], so tests drive time
//! with [`ManualScheduler`] while the server uses [`TokioScheduler`].

mod scheduler;

pub use scheduler::{ManualScheduler, Scheduler, Tick, TimerHandle, TokioScheduler};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Time between automatic advances.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3000);

/// Errors raised by carousel construction and navigation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("carousel needs at least one image")]
    Empty,

    #[error("index {index} is out of range for {len} images")]
    InvalidIndex { index: i64, len: usize },
}

/// High-level timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CarouselState {
    Running,
    Stopped,
}

/// Index into a non-empty sequence that wraps in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    /// Cursor at index 0. `len` must be at least 1.
    pub fn new(len: usize) -> Result<Self, CarouselError> {
        if len == 0 {
            return Err(CarouselError::Empty);
        }
        Ok(Self { index: 0, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn retreat(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }

    /// Move to `index` if it is in range; otherwise leave the cursor alone.
    pub fn set(&mut self, index: usize) -> Result<usize, CarouselError> {
        if index >= self.len {
            return Err(CarouselError::InvalidIndex {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len: self.len,
            });
        }
        self.index = index;
        Ok(index)
    }
}

/// State shared with the timer callback.
///
/// `epoch` changes on every start/stop so a callback belonging to a
/// released timer can never advance the cursor, even if it is already
/// executing when the release happens.
#[derive(Debug)]
struct Shared {
    cursor: Cursor,
    state: CarouselState,
    epoch: u64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Rotating image carousel for one gallery category.
#[derive(Debug)]
pub struct Carousel {
    caption: String,
    items: Vec<String>,
    interval: Duration,
    scheduler: Arc<dyn Scheduler>,
    shared: Arc<Mutex<Shared>>,
    // Lock order: `timer` before `shared`.
    timer: Mutex<Option<TimerHandle>>,
}

impl Carousel {
    /// Build a carousel with the default 3 s interval and start it.
    pub fn new(
        items: Vec<String>,
        caption: impl Into<String>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self, CarouselError> {
        Self::with_interval(items, caption, scheduler, DEFAULT_INTERVAL)
    }

    /// Build a carousel with a custom interval and start it.
    ///
    /// A zero interval is raised to one millisecond.
    pub fn with_interval(
        items: Vec<String>,
        caption: impl Into<String>,
        scheduler: Arc<dyn Scheduler>,
        interval: Duration,
    ) -> Result<Self, CarouselError> {
        let cursor = Cursor::new(items.len())?;
        let carousel = Self {
            caption: caption.into(),
            items,
            interval: interval.max(Duration::from_millis(1)),
            scheduler,
            shared: Arc::new(Mutex::new(Shared {
                cursor,
                state: CarouselState::Stopped,
                epoch: 0,
            })),
            timer: Mutex::new(None),
        };
        carousel.start();
        Ok(carousel)
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> CarouselState {
        lock(&self.shared).state
    }

    pub fn is_running(&self) -> bool {
        self.state() == CarouselState::Running
    }

    /// Begin automatic advancement. No-op when already running.
    pub fn start(&self) {
        let mut timer = lock(&self.timer);
        let epoch = {
            let mut shared = lock(&self.shared);
            if shared.state == CarouselState::Running {
                return;
            }
            shared.state = CarouselState::Running;
            shared.epoch += 1;
            shared.epoch
        };
        *timer = self.acquire_timer(epoch);
    }

    /// Release the current timer, then acquire a fresh one.
    ///
    /// Used when the hosting view is rebuilt; the new timer's first tick is
    /// one full interval after this call.
    pub fn restart(&self) {
        let mut timer = lock(&self.timer);
        if let Some(mut previous) = timer.take() {
            previous.cancel();
        }
        let epoch = {
            let mut shared = lock(&self.shared);
            shared.state = CarouselState::Running;
            shared.epoch += 1;
            shared.epoch
        };
        *timer = self.acquire_timer(epoch);
    }

    /// Stop automatic advancement. Safe to call in any state.
    pub fn stop(&self) {
        let mut timer = lock(&self.timer);
        {
            let mut shared = lock(&self.shared);
            if shared.state == CarouselState::Stopped {
                return;
            }
            shared.state = CarouselState::Stopped;
            shared.epoch += 1;
        }
        if let Some(mut handle) = timer.take() {
            handle.cancel();
            tracing::debug!(caption = %self.caption, "carousel timer released");
        }
    }

    fn acquire_timer(&self, epoch: u64) -> Option<TimerHandle> {
        if self.items.len() <= 1 {
            tracing::debug!(caption = %self.caption, "single image, no timer needed");
            return None;
        }

        let shared = Arc::clone(&self.shared);
        let tick: Tick = Arc::new(move || {
            let mut shared = lock(&shared);
            if shared.epoch == epoch && shared.state == CarouselState::Running {
                shared.cursor.advance();
            }
        });

        tracing::debug!(
            caption = %self.caption,
            interval_ms = self.interval.as_millis() as u64,
            "carousel timer acquired"
        );
        Some(self.scheduler.every(self.interval, tick))
    }

    /// Show the following image, wrapping to the first.
    pub fn next(&self) -> usize {
        lock(&self.shared).cursor.advance()
    }

    /// Show the preceding image, wrapping to the last.
    pub fn previous(&self) -> usize {
        lock(&self.shared).cursor.retreat()
    }

    /// Show the image at `index`. Out-of-range indices are rejected and the
    /// current image stays put.
    pub fn jump_to(&self, index: usize) -> Result<usize, CarouselError> {
        lock(&self.shared).cursor.set(index)
    }

    /// Like [`jump_to`](Self::jump_to) but for indices that arrive signed,
    /// e.g. from a JSON body.
    pub fn jump_to_signed(&self, index: i64) -> Result<usize, CarouselError> {
        match usize::try_from(index) {
            Ok(index) => self.jump_to(index),
            Err(_) => Err(CarouselError::InvalidIndex {
                index,
                len: self.items.len(),
            }),
        }
    }

    pub fn active_index(&self) -> usize {
        lock(&self.shared).cursor.index()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active_index() == index
    }

    /// Consistent view for the rendering layer.
    pub fn snapshot(&self) -> CarouselSnapshot {
        let (active_index, state) = {
            let shared = lock(&self.shared);
            (shared.cursor.index(), shared.state)
        };

        let slides = self
            .items
            .iter()
            .enumerate()
            .map(|(i, src)| Slide {
                src: src.clone(),
                alt: format!("{} - {}", self.caption, i + 1),
                active: i == active_index,
            })
            .collect();

        CarouselSnapshot {
            caption: self.caption.clone(),
            active_index,
            state,
            slides,
        }
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One image as seen by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub src: String,
    pub alt: String,
    pub active: bool,
}

/// Point-in-time view of a carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselSnapshot {
    pub caption: String,
    pub active_index: usize,
    pub state: CarouselState,
    pub slides: Vec<Slide>,
}
