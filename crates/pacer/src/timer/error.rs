use thiserror::Error;

use super::clock::ClockMode;

/// Errors surfaced by the presentation timer core.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// A run needs at least one slide.
    #[error("cannot start with an empty plan")]
    EmptySchedule,

    /// The operation is not valid in the current mode. The state is left
    /// exactly as it was.
    #[error("cannot {op} while {from}")]
    InvalidTransition { from: ClockMode, op: &'static str },

    /// The plan's total duration is zero, so progress fractions are
    /// meaningless. Callers show 0% and surface the condition instead.
    #[error("plan has no time budget, progress is undefined")]
    UndefinedProgress,
}
