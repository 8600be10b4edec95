//! Text formatting for the terminal front-end.

/// `MM:SS` with a leading minus for negative amounts, whole seconds.
pub fn mmss(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total = seconds.abs().floor() as u64;
    format!("{sign}{:02}:{:02}", total / 60, total % 60)
}

/// `Xm YYs` for planned budgets.
pub fn budget(seconds: u64) -> String {
    format!("{}m {:02}s", seconds / 60, seconds % 60)
}

/// Signed whole seconds, e.g. `+18s` or `-8s`.
pub fn signed_seconds(seconds: f64) -> String {
    format!("{:+}s", seconds.floor() as i64)
}
