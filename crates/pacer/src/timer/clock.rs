use std::fmt;
use std::time::{Duration, Instant};

use super::error::ClockError;

/// Lifecycle of a presentation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// No run in progress; the plan is being prepared.
    Setup,
    Running,
    Paused,
    /// Reserved. Reaching the end of the plan clamps at the last slide
    /// and stays Running; nothing transitions into this mode yet.
    #[allow(dead_code)]
    Finished,
}

impl fmt::Display for ClockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Setup => "in setup",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Finished => "finished",
        };
        write!(f, "{name}")
    }
}

/// Wall-clock bookkeeping for a single presentation run.
///
/// Elapsed time is always derived from absolute timestamps
/// (`now − started_at − paused_total`), never accumulated tick over tick,
/// so reading it twice with the same `now` yields the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationClock {
    mode: ClockMode,
    started_at: Option<Instant>,
    paused_at: Option<Instant>,
    paused_total: Duration,
    current_slide: usize,
    slide_count: usize,
}

impl PresentationClock {
    pub fn new() -> Self {
        Self {
            mode: ClockMode::Setup,
            started_at: None,
            paused_at: None,
            paused_total: Duration::ZERO,
            current_slide: 0,
            slide_count: 0,
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.mode == ClockMode::Running
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    /// Begin a run over `slide_count` slides at `now`.
    ///
    /// Fails without touching any state when the plan is empty; otherwise
    /// all bookkeeping is reset and the first slide becomes current.
    pub fn start(&mut self, slide_count: usize, now: Instant) -> Result<(), ClockError> {
        if slide_count == 0 {
            return Err(ClockError::EmptySchedule);
        }
        self.mode = ClockMode::Running;
        self.started_at = Some(now);
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
        self.current_slide = 0;
        self.slide_count = slide_count;
        Ok(())
    }

    /// Freeze the clock. Valid only while running.
    pub fn pause(&mut self, now: Instant) -> Result<(), ClockError> {
        if self.mode != ClockMode::Running {
            return Err(ClockError::InvalidTransition {
                from: self.mode,
                op: "pause",
            });
        }
        self.mode = ClockMode::Paused;
        self.paused_at = Some(now);
        Ok(())
    }

    /// Unfreeze the clock, folding the pause into the paused total.
    /// Valid only while paused.
    pub fn resume(&mut self, now: Instant) -> Result<(), ClockError> {
        if self.mode != ClockMode::Paused {
            return Err(ClockError::InvalidTransition {
                from: self.mode,
                op: "resume",
            });
        }
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(paused_at);
        }
        self.mode = ClockMode::Running;
        Ok(())
    }

    /// End the run from any mode, returning to the exact pre-start shape.
    pub fn stop(&mut self) {
        *self = Self::new();
    }

    /// Seconds of presentation time at `now`: wall-clock time since start
    /// minus total time spent paused. Frozen at the pause instant while
    /// paused, zero in setup, never negative.
    pub fn elapsed(&self, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let effective_now = match self.mode {
            ClockMode::Paused => self.paused_at.unwrap_or(now),
            _ => now,
        };
        effective_now
            .saturating_duration_since(started_at)
            .saturating_sub(self.paused_total)
            .as_secs_f64()
    }

    /// Move the current slide by `delta`, clamped to the plan bounds.
    /// A step past either end changes nothing; there is no wrap-around.
    pub fn change_slide(&mut self, delta: i64) {
        if self.slide_count == 0 {
            return;
        }
        let max = (self.slide_count - 1) as i64;
        self.current_slide = (self.current_slide as i64 + delta).clamp(0, max) as usize;
    }

    /// Pin the current slide to an absolute index (auto-advance).
    pub(crate) fn set_slide(&mut self, index: usize) {
        self.current_slide = index.min(self.slide_count.saturating_sub(1));
    }
}

impl Default for PresentationClock {
    fn default() -> Self {
        Self::new()
    }
}
