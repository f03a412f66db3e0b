//! Recurring timers owned by carousels.
//!
//! A [`Scheduler`] hands out [`TimerHandle`]s. The handle is the only way to
//! cancel the timer, and dropping it cancels too, so a timer can never
//! outlive whatever owns its handle.
//!
//! Two implementations are provided:
//! - [`TokioScheduler`] spawns a task on the current tokio runtime.
//! - [`ManualScheduler`] is a virtual clock that only moves when
//!   [`ManualScheduler::advance`] is called, for deterministic tests.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Shortest period a timer will run at.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Callback fired once per timer period.
pub type Tick = Arc<dyn Fn() + Send + Sync>;

/// Source of recurring timers.
pub trait Scheduler: Send + Sync + fmt::Debug {
    /// Fire `tick` every `period`, first one period from now.
    fn every(&self, period: Duration, tick: Tick) -> TimerHandle;
}

/// Owned handle to a recurring timer.
#[derive(Debug)]
pub struct TimerHandle {
    inner: Option<TimerInner>,
}

#[derive(Debug)]
enum TimerInner {
    Task(JoinHandle<()>),
    Flag(Arc<AtomicBool>),
}

impl TimerHandle {
    fn task(handle: JoinHandle<()>) -> Self {
        Self {
            inner: Some(TimerInner::Task(handle)),
        }
    }

    fn flag(cancelled: Arc<AtomicBool>) -> Self {
        Self {
            inner: Some(TimerInner::Flag(cancelled)),
        }
    }

    /// Stop the timer. Calling this more than once is a no-op.
    pub fn cancel(&mut self) {
        match self.inner.take() {
            Some(TimerInner::Task(handle)) => handle.abort(),
            Some(TimerInner::Flag(cancelled)) => cancelled.store(true, Ordering::SeqCst),
            None => {}
        }
    }

    /// Whether [`cancel`](Self::cancel) has already run.
    pub fn is_cancelled(&self) -> bool {
        self.inner.is_none()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Scheduler backed by the tokio runtime.
///
/// Must be used from within a runtime context since every timer is a
/// spawned task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn every(&self, period: Duration, tick: Tick) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            // A stalled runtime should never produce a burst of catch-up ticks
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tick();
            }
        });
        TimerHandle::task(handle)
    }
}

/// Virtual-time scheduler for tests.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<ManualClock>>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    timers: Vec<ManualTimer>,
}

struct ManualTimer {
    period: Duration,
    next_due: Duration,
    tick: Tick,
    cancelled: Arc<AtomicBool>,
}

impl ManualTimer {
    fn is_live(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst)
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn clock(&self) -> MutexGuard<'_, ManualClock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Time elapsed on the virtual clock.
    pub fn elapsed(&self) -> Duration {
        self.clock().now
    }

    /// Number of timers that have not been cancelled.
    pub fn active_timers(&self) -> usize {
        self.clock().timers.iter().filter(|t| t.is_live()).count()
    }

    /// Move the virtual clock forward, firing every tick that falls due in
    /// deadline order. Ticks run without the clock lock held.
    pub fn advance(&self, by: Duration) {
        let target = self.clock().now + by;

        loop {
            let due = {
                let mut clock = self.clock();
                let next = clock
                    .timers
                    .iter_mut()
                    .filter(|t| t.is_live() && t.next_due <= target)
                    .min_by_key(|t| t.next_due);

                match next {
                    Some(timer) => {
                        let fired_at = timer.next_due;
                        timer.next_due += timer.period;
                        let tick = Arc::clone(&timer.tick);
                        clock.now = fired_at;
                        Some(tick)
                    }
                    None => None,
                }
            };

            match due {
                Some(tick) => tick(),
                None => break,
            }
        }

        let mut clock = self.clock();
        clock.now = target;
        clock.timers.retain(ManualTimer::is_live);
    }
}

impl Scheduler for ManualScheduler {
    fn every(&self, period: Duration, tick: Tick) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut clock = self.clock();
        let next_due = clock.now + period;
        clock.timers.push(ManualTimer {
            period,
            next_due,
            tick,
            cancelled: Arc::clone(&cancelled),
        });
        TimerHandle::flag(cancelled)
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.clock();
        f.debug_struct("ManualScheduler")
            .field("now", &clock.now)
            .field("timers", &clock.timers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, Tick) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, Arc::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }))
    }

    #[test]
    fn test_manual_fires_once_per_period() {
        let scheduler = ManualScheduler::new();
        let (count, tick) = counter();
        let _timer = scheduler.every(Duration::from_millis(3000), tick);

        scheduler.advance(Duration::from_millis(2999));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        scheduler.advance(Duration::from_millis(9000));
        assert_eq!(count.load(Ordering::SeqCst), 4);
        assert_eq!(scheduler.elapsed(), Duration::from_millis(12000));
    }

    #[test]
    fn test_manual_cancel_stops_ticks() {
        let scheduler = ManualScheduler::new();
        let (count, tick) = counter();
        let mut timer = scheduler.every(Duration::from_millis(100), tick);
        assert_eq!(scheduler.active_timers(), 1);

        timer.cancel();
        timer.cancel();
        assert!(timer.is_cancelled());
        assert_eq!(scheduler.active_timers(), 0);

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_manual_drop_cancels() {
        let scheduler = ManualScheduler::new();
        let (count, tick) = counter();
        drop(scheduler.every(Duration::from_millis(100), tick));

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_manual_timer_registered_mid_run_starts_from_now() {
        let scheduler = ManualScheduler::new();
        scheduler.advance(Duration::from_millis(500));

        let (count, tick) = counter();
        let _timer = scheduler.every(Duration::from_millis(1000), tick);

        scheduler.advance(Duration::from_millis(999));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_ticks_on_period() {
        let (count, tick) = counter();
        let _timer = TokioScheduler.every(Duration::from_millis(3000), tick);

        tokio::time::sleep(Duration::from_millis(2900)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(6200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_cancel_aborts_task() {
        let (count, tick) = counter();
        let mut timer = TokioScheduler.every(Duration::from_millis(100), tick);

        tokio::time::sleep(Duration::from_millis(250)).await;
        timer.cancel();
        let seen = count.load(Ordering::SeqCst);
        assert_eq!(seen, 2);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }
}
