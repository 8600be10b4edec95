use std::time::Instant;

use super::{at, close};
use crate::timer::{ClockError, ClockMode, PresentationClock};

#[test]
fn starts_at_zero_elapsed() {
    let t0 = Instant::now();
    let mut clock = PresentationClock::new();
    clock.start(3, t0).unwrap();
    assert_eq!(clock.mode(), ClockMode::Running);
    assert_eq!(clock.current_slide(), 0);
    assert!(close(clock.elapsed(t0), 0.0));
}

#[test]
fn empty_plan_is_rejected_and_state_untouched() {
    let t0 = Instant::now();
    let mut clock = PresentationClock::new();
    assert_eq!(clock.start(0, t0), Err(ClockError::EmptySchedule));
    assert_eq!(clock, PresentationClock::new());

    // Also mid-run: a failed restart must not clobber the run.
    clock.start(3, t0).unwrap();
    clock.change_slide(2);
    assert_eq!(clock.start(0, at(t0, 5.0)), Err(ClockError::EmptySchedule));
    assert_eq!(clock.mode(), ClockMode::Running);
    assert_eq!(clock.current_slide(), 2);
    assert!(close(clock.elapsed(at(t0, 5.0)), 5.0));
}

#[test]
fn elapsed_derives_from_absolute_timestamps() {
    let t0 = Instant::now();
    let mut clock = PresentationClock::new();
    clock.start(3, t0).unwrap();
    assert!(close(clock.elapsed(at(t0, 2.5)), 2.5));
    assert!(close(clock.elapsed(at(t0, 10.0)), 10.0));
    // Same instant, same answer: nothing accumulates between reads.
    assert!(close(clock.elapsed(at(t0, 10.0)), 10.0));
}

#[test]
fn pause_freezes_elapsed() {
    let t0 = Instant::now();
    let mut clock = PresentationClock::new();
    clock.start(3, t0).unwrap();
    clock.pause(at(t0, 5.0)).unwrap();
    assert_eq!(clock.mode(), ClockMode::Paused);
    assert!(close(clock.elapsed(at(t0, 5.0)), 5.0));
    assert!(close(clock.elapsed(at(t0, 60.0)), 5.0));
}

#[test]
fn resume_subtracts_exactly_the_pause() {
    let t0 = Instant::now();
    let mut clock = PresentationClock::new();
    clock.start(3, t0).unwrap();
    clock.pause(at(t0, 5.0)).unwrap();
    clock.resume(at(t0, 9.0)).unwrap();
    // At wall-clock t0+12 the run has been paused for 4 seconds, so
    // elapsed reads as if the pause never happened, minus its length.
    assert!(close(clock.elapsed(at(t0, 12.0)), 8.0));
}

#[test]
fn multiple_pauses_accumulate() {
    let t0 = Instant::now();
    let mut clock = PresentationClock::new();
    clock.start(3, t0).unwrap();
    clock.pause(at(t0, 2.0)).unwrap();
    clock.resume(at(t0, 4.0)).unwrap();
    clock.pause(at(t0, 7.0)).unwrap();
    clock.resume(at(t0, 10.0)).unwrap();
    assert!(close(clock.elapsed(at(t0, 15.0)), 10.0));
}

#[test]
fn invalid_transitions_are_rejected() {
    let t0 = Instant::now();
    let mut clock = PresentationClock::new();

    assert!(matches!(
        clock.pause(t0),
        Err(ClockError::InvalidTransition { op: "pause", .. })
    ));
    assert!(matches!(
        clock.resume(t0),
        Err(ClockError::InvalidTransition { op: "resume", .. })
    ));

    clock.start(3, t0).unwrap();
    assert!(matches!(
        clock.resume(at(t0, 1.0)),
        Err(ClockError::InvalidTransition { op: "resume", .. })
    ));

    clock.pause(at(t0, 2.0)).unwrap();
    assert!(matches!(
        clock.pause(at(t0, 3.0)),
        Err(ClockError::InvalidTransition { op: "pause", .. })
    ));
    // The rejected calls changed nothing.
    assert!(close(clock.elapsed(at(t0, 9.0)), 2.0));
}

#[test]
fn change_slide_clamps_at_both_ends() {
    let t0 = Instant::now();
    let mut clock = PresentationClock::new();
    clock.start(3, t0).unwrap();

    clock.change_slide(-1);
    assert_eq!(clock.current_slide(), 0);

    clock.change_slide(1);
    clock.change_slide(1);
    assert_eq!(clock.current_slide(), 2);

    clock.change_slide(1);
    assert_eq!(clock.current_slide(), 2);

    clock.change_slide(-10);
    assert_eq!(clock.current_slide(), 0);
}

#[test]
fn stop_restores_the_pre_start_shape() {
    let t0 = Instant::now();
    let mut clock = PresentationClock::new();
    clock.start(5, t0).unwrap();
    clock.pause(at(t0, 1.0)).unwrap();
    clock.resume(at(t0, 2.0)).unwrap();
    clock.pause(at(t0, 3.0)).unwrap();
    clock.resume(at(t0, 4.0)).unwrap();
    clock.change_slide(3);

    clock.stop();
    assert_eq!(clock, PresentationClock::new());
    assert!(close(clock.elapsed(at(t0, 10.0)), 0.0));
}

#[test]
fn stop_is_valid_from_any_mode() {
    let t0 = Instant::now();
    let mut clock = PresentationClock::new();
    clock.stop();
    assert_eq!(clock.mode(), ClockMode::Setup);

    clock.start(2, t0).unwrap();
    clock.pause(at(t0, 1.0)).unwrap();
    clock.stop();
    assert_eq!(clock.mode(), ClockMode::Setup);
}
