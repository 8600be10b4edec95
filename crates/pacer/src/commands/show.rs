use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::display;
use crate::plan::Plan;
use crate::timer::evaluate;

/// Print a plan's timeline: budgets and cumulative boundaries.
pub fn run(file: &Path) -> Result<()> {
    let plan = Plan::load(file)?;
    if let Some(title) = &plan.title {
        println!("{}", title.bold());
    }
    print_plan(&plan);
    Ok(())
}

pub fn print_plan(plan: &Plan) {
    if plan.is_empty() {
        println!("{}", "The plan has no slides.".yellow());
        return;
    }

    println!(
        "{}",
        format!("{:>3}  {:<40} {:>8} {:>8}", "#", "Title", "Budget", "Ends at").dimmed()
    );
    for (i, slide) in plan.slides.iter().enumerate() {
        println!(
            "{:>3}  {:<40} {:>8} {:>8}",
            slide.number,
            truncated(&slide.title, 40),
            display::budget(slide.duration_seconds),
            display::mmss(evaluate::cumulative_end(plan, i))
        );
    }
    println!(
        "{}",
        format!(
            "Total: {} across {} slide(s)",
            display::budget(plan.total_seconds()),
            plan.len()
        )
        .bold()
    );
}

fn truncated(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_keeps_short_titles() {
        assert_eq!(truncated("Intro", 40), "Intro");
    }

    #[test]
    fn truncated_cuts_long_titles_with_ellipsis() {
        let long = "A very long slide title that keeps going and going";
        let cut = truncated(long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }
}
