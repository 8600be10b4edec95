//! Verbosity-gated diagnostics, controlled by `-v`/`-vv`.

use colored::Colorize;
use std::sync::atomic::{AtomicU8, Ordering};

static VERBOSITY: AtomicU8 = AtomicU8::new(0);

pub fn init(verbose: u8) {
    VERBOSITY.store(verbose, Ordering::Relaxed);
}

/// `-v` level diagnostics, written to stderr.
pub fn debug(message: impl AsRef<str>) {
    if VERBOSITY.load(Ordering::Relaxed) >= 1 {
        eprintln!("{} {}", "debug:".dimmed(), message.as_ref());
    }
}

/// `-vv` level diagnostics, written to stderr.
pub fn trace(message: impl AsRef<str>) {
    if VERBOSITY.load(Ordering::Relaxed) >= 2 {
        eprintln!("{} {}", "trace:".dimmed(), message.as_ref());
    }
}
