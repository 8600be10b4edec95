use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::config::Config;
use crate::display;
use crate::plan::Plan;

/// Create a starter plan file with evenly distributed slide budgets.
pub fn run(
    file: &Path,
    slides: Option<usize>,
    minutes: Option<u64>,
    force: bool,
    quiet: bool,
) -> Result<()> {
    if file.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            file.display()
        );
    }

    let config = Config::load_or_default();
    let slides = slides.unwrap_or_else(|| config.default_slides());
    let minutes = minutes.unwrap_or_else(|| config.default_minutes());
    if slides == 0 {
        anyhow::bail!("A plan needs at least one slide.");
    }

    let plan = Plan::starter(slides, minutes * 60);
    plan.save(file)?;

    if !quiet {
        println!(
            "{}",
            format!(
                "Created {} with {} slides, {} each.",
                file.display(),
                slides,
                display::budget(plan.slides[0].duration_seconds)
            )
            .green()
        );
        println!("Edit it with `pacer edit {}`.", file.display());
    }
    Ok(())
}
