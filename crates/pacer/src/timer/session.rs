use std::time::{Duration, Instant};

use crate::plan::Plan;

use super::clock::{ClockMode, PresentationClock};
use super::error::ClockError;
use super::evaluate;

/// Cadence of the periodic tick while a run is active.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Drift smaller than this is shown without a seconds figure.
const DRIFT_REPORT_THRESHOLD_SECS: f64 = 5.0;

/// Who decides which slide is showing, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceMode {
    /// The clock drives the slide: every tick pins it to the ideal index.
    /// Manual navigation is rejected.
    Auto,
    /// The operator drives the slide; ticks never move it and the clock
    /// only reports drift.
    Manual,
}

/// Where the operator stands relative to the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drift {
    OnTime,
    /// The plan has moved past the slide being shown.
    Behind,
    /// The slide being shown is further along than the plan.
    Ahead,
}

/// Drift state plus an offset once it is large enough to be worth showing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftReport {
    pub drift: Drift,
    /// Seconds relative to the current slide's planned start; positive
    /// means over-time on it. Absent while on time or within the
    /// reporting threshold.
    pub offset_seconds: Option<f64>,
}

/// Repeating tick deadline owned by the Running state.
///
/// Dropping the handle is cancellation. A fire is additionally only
/// honored while the clock is actually running, so a deadline that
/// outlives a transition can never mutate state.
#[derive(Debug, Clone)]
struct Ticker {
    next_due: Instant,
}

impl Ticker {
    fn new(now: Instant) -> Self {
        Self {
            next_due: now + TICK_INTERVAL,
        }
    }

    /// Time until the next tick is due (zero when overdue).
    fn until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Consume the deadline if it has passed and arm the next one.
    fn fire(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + TICK_INTERVAL;
        true
    }
}

/// Read-only derived view of the run, recomputed from the plan and the
/// clock on every read. Nothing writes these values back.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub mode: ClockMode,
    pub auto_advance: bool,
    pub current_slide: usize,
    pub ideal_slide: usize,
    pub elapsed_seconds: f64,
    pub slide_remaining_seconds: f64,
    pub global_remaining_seconds: f64,
    /// Fraction of the plan consumed; `None` when the plan has no time
    /// budget at all.
    pub progress: Option<f64>,
    /// Present only in manual mode; auto mode is on schedule by
    /// construction.
    pub drift: Option<DriftReport>,
}

/// A single presentation run: the plan, the clock and the advance policy.
pub struct Session {
    plan: Plan,
    clock: PresentationClock,
    advance: AdvanceMode,
    ticker: Option<Ticker>,
}

impl Session {
    pub fn new(plan: Plan, advance: AdvanceMode) -> Self {
        Self {
            plan,
            clock: PresentationClock::new(),
            advance,
            ticker: None,
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn mode(&self) -> ClockMode {
        self.clock.mode()
    }

    /// Start the run at `now`. Fails with `EmptySchedule` for a plan
    /// without slides, leaving everything untouched.
    pub fn start(&mut self, now: Instant) -> Result<(), ClockError> {
        self.clock.start(self.plan.len(), now)?;
        self.ticker = Some(Ticker::new(now));
        Ok(())
    }

    pub fn pause(&mut self, now: Instant) -> Result<(), ClockError> {
        self.clock.pause(now)?;
        self.ticker = None;
        Ok(())
    }

    pub fn resume(&mut self, now: Instant) -> Result<(), ClockError> {
        self.clock.resume(now)?;
        self.ticker = Some(Ticker::new(now));
        Ok(())
    }

    /// End the run from any mode. Effective immediately: the tick handle
    /// is dropped and a stale deadline can no longer reach the clock.
    pub fn stop(&mut self) {
        self.clock.stop();
        self.ticker = None;
    }

    /// Fire the periodic tick if one is armed and due. Returns whether a
    /// tick ran; at most one fires per `TICK_INTERVAL`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match &mut self.ticker {
            Some(ticker) => ticker.fire(now),
            None => false,
        };
        if due {
            // The mode guard in tick() covers a deadline that survived a
            // transition out of Running.
            let _ = self.tick(now);
        }
        due
    }

    /// Time until the next tick is due, for the caller's input polling.
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.as_ref().map(|t| t.until_due(now))
    }

    /// Recompute derived state at `now`. Valid only while running.
    ///
    /// Idempotent for a given `now`: the slide assignment and everything
    /// in the snapshot depend on absolute timestamps, not on prior ticks.
    pub fn tick(&mut self, now: Instant) -> Result<(), ClockError> {
        if !self.clock.is_running() {
            return Err(ClockError::InvalidTransition {
                from: self.clock.mode(),
                op: "tick",
            });
        }
        if self.advance == AdvanceMode::Auto {
            let ideal = evaluate::ideal_index(&self.plan, self.clock.elapsed(now));
            self.clock.set_slide(ideal);
        }
        Ok(())
    }

    /// Manual navigation, clamped to the plan bounds. Rejected while
    /// auto-advance owns the slide position.
    pub fn change_slide(&mut self, delta: i64) -> Result<(), ClockError> {
        if self.advance == AdvanceMode::Auto {
            return Err(ClockError::InvalidTransition {
                from: self.clock.mode(),
                op: "navigate manually",
            });
        }
        self.clock.change_slide(delta);
        Ok(())
    }

    pub fn current_slide(&self) -> usize {
        self.clock.current_slide()
    }

    /// Derive the full read model at `now`.
    pub fn snapshot(&self, now: Instant) -> Snapshot {
        let elapsed = self.clock.elapsed(now);
        let current = self.clock.current_slide();
        let ideal = evaluate::ideal_index(&self.plan, elapsed);
        let drift = match self.advance {
            AdvanceMode::Auto => None,
            AdvanceMode::Manual => Some(drift_report(&self.plan, current, ideal, elapsed)),
        };
        Snapshot {
            mode: self.clock.mode(),
            auto_advance: self.advance == AdvanceMode::Auto,
            current_slide: current,
            ideal_slide: ideal,
            elapsed_seconds: elapsed,
            slide_remaining_seconds: evaluate::remaining_in_slide(&self.plan, current, elapsed),
            global_remaining_seconds: evaluate::global_remaining(&self.plan, elapsed),
            progress: evaluate::progress(&self.plan, elapsed).ok(),
            drift,
        }
    }
}

/// Compare the shown slide against the ideal one and measure the offset
/// from the shown slide's planned start. The offset is only attached
/// beyond the reporting threshold, and never while on time.
fn drift_report(plan: &Plan, current: usize, ideal: usize, elapsed: f64) -> DriftReport {
    let drift = if ideal == current {
        Drift::OnTime
    } else if ideal > current {
        Drift::Behind
    } else {
        Drift::Ahead
    };
    let offset = elapsed - evaluate::cumulative_start(plan, current);
    let offset_seconds =
        (drift != Drift::OnTime && offset.abs() > DRIFT_REPORT_THRESHOLD_SECS).then_some(offset);
    DriftReport {
        drift,
        offset_seconds,
    }
}
