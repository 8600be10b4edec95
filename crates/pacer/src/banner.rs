use colored::Colorize;

/// Print the name/version banner used by `pacer version`.
pub fn print_banner_with_version() {
    println!(
        "{} {}",
        "pacer".blue().bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!("A presentation pacing timer");
}
