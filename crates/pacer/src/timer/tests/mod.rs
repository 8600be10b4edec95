mod clock;

use std::time::{Duration, Instant};

use crate::plan::{Plan, Slide};

/// Build a plan from raw durations in seconds.
fn plan_of(durations: &[u64]) -> Plan {
    let slides = durations
        .iter()
        .enumerate()
        .map(|(i, &secs)| Slide {
            id: format!("slide-{i}"),
            number: i + 1,
            title: format!("Slide {}", i + 1),
            duration_seconds: secs,
        })
        .collect();
    Plan {
        title: None,
        slides,
    }
}

/// `origin` shifted forward by fractional seconds.
fn at(origin: Instant, secs: f64) -> Instant {
    origin + Duration::from_secs_f64(secs)
}

/// Float comparison with a tolerance far below the timer's resolution.
fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
