//! Carousel timing driven through the public API on a virtual clock.

use std::sync::Arc;
use std::time::Duration;

use portfolio::carousel::{Carousel, CarouselError, CarouselState, ManualScheduler, DEFAULT_INTERVAL};
use portfolio::gallery::{Gallery, PROJECTS};

fn images(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("/resources/{}.png", i)).collect()
}

fn carousel(n: usize) -> (Carousel, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let carousel = Carousel::new(images(n), "Test", Arc::new(scheduler.clone())).unwrap();
    (carousel, scheduler)
}

#[test]
fn test_three_intervals_advance_three_times() {
    let (carousel, scheduler) = carousel(4);
    assert_eq!(carousel.active_index(), 0);

    scheduler.advance(DEFAULT_INTERVAL * 3);
    assert_eq!(carousel.active_index(), 3);

    scheduler.advance(DEFAULT_INTERVAL);
    assert_eq!(carousel.active_index(), 0);
}

#[test]
fn test_partial_interval_does_not_advance() {
    let (carousel, scheduler) = carousel(4);
    scheduler.advance(DEFAULT_INTERVAL - Duration::from_millis(1));
    assert_eq!(carousel.active_index(), 0);

    scheduler.advance(Duration::from_millis(1));
    assert_eq!(carousel.active_index(), 1);
}

#[test]
fn test_manual_navigation_does_not_reset_timer() {
    let (carousel, scheduler) = carousel(3);
    scheduler.advance(Duration::from_millis(2000));
    assert_eq!(carousel.next(), 1);

    // The pending tick still lands at 3000 ms.
    scheduler.advance(Duration::from_millis(1000));
    assert_eq!(carousel.active_index(), 2);
}

#[test]
fn test_jump_then_tick_continues_from_target() {
    let (carousel, scheduler) = carousel(5);
    assert_eq!(carousel.jump_to(4), Ok(4));

    scheduler.advance(DEFAULT_INTERVAL);
    assert_eq!(carousel.active_index(), 0);
}

#[test]
fn test_invalid_jump_keeps_position() {
    let (carousel, _scheduler) = carousel(3);
    carousel.next();

    assert_eq!(
        carousel.jump_to(3),
        Err(CarouselError::InvalidIndex { index: 3, len: 3 })
    );
    assert_eq!(carousel.active_index(), 1);
}

#[test]
fn test_stop_freezes_and_restart_waits_full_interval() {
    let (carousel, scheduler) = carousel(4);
    scheduler.advance(DEFAULT_INTERVAL);
    carousel.stop();
    carousel.stop();
    assert_eq!(carousel.state(), CarouselState::Stopped);
    assert_eq!(scheduler.active_timers(), 0);

    scheduler.advance(DEFAULT_INTERVAL * 5);
    assert_eq!(carousel.active_index(), 1);

    carousel.restart();
    scheduler.advance(DEFAULT_INTERVAL - Duration::from_millis(1));
    assert_eq!(carousel.active_index(), 1);
    scheduler.advance(Duration::from_millis(1));
    assert_eq!(carousel.active_index(), 2);
    assert_eq!(scheduler.active_timers(), 1);
}

#[test]
fn test_single_image_never_moves() {
    let (carousel, scheduler) = carousel(1);
    assert_eq!(scheduler.active_timers(), 0);

    scheduler.advance(DEFAULT_INTERVAL * 10);
    assert_eq!(carousel.next(), 0);
    assert_eq!(carousel.previous(), 0);
    assert_eq!(carousel.active_index(), 0);
}

#[test]
fn test_dropping_gallery_releases_every_timer() {
    let scheduler = ManualScheduler::new();
    let gallery = Gallery::new(PROJECTS, Arc::new(scheduler.clone()), DEFAULT_INTERVAL).unwrap();
    assert_eq!(scheduler.active_timers(), PROJECTS.len());

    drop(gallery);
    assert_eq!(scheduler.active_timers(), 0);
}
