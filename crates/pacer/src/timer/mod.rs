pub mod clock;
pub mod error;
pub mod evaluate;
pub mod session;

#[cfg(test)]
mod tests;

pub use clock::{ClockMode, PresentationClock};
pub use error::ClockError;
pub use session::{AdvanceMode, Drift, DriftReport, Session, Snapshot, TICK_INTERVAL};
