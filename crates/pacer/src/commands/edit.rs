use anyhow::Result;
use colored::Colorize;
use inquire::{Select, Text};
use std::path::Path;

use crate::commands::show;
use crate::display;
use crate::plan::{self, Plan};

const ACTION_EDIT: &str = "Edit a slide";
const ACTION_ADD: &str = "Add a slide";
const ACTION_REMOVE: &str = "Remove a slide";
const ACTION_COUNT: &str = "Set slide count";
const ACTION_DISTRIBUTE: &str = "Distribute time evenly";
const ACTION_SAVE: &str = "Save and exit";
const ACTION_DISCARD: &str = "Discard changes";

/// Interactive plan editor.
pub fn run(file: &Path) -> Result<()> {
    let mut plan = Plan::load(file)?;

    loop {
        println!();
        show::print_plan(&plan);

        let actions = vec![
            ACTION_EDIT,
            ACTION_ADD,
            ACTION_REMOVE,
            ACTION_COUNT,
            ACTION_DISTRIBUTE,
            ACTION_SAVE,
            ACTION_DISCARD,
        ];
        match Select::new("Edit plan:", actions).prompt()? {
            ACTION_EDIT => edit_slide(&mut plan)?,
            ACTION_ADD => {
                let title = Text::new("Title:").prompt()?;
                let title = (!title.trim().is_empty()).then(|| title.trim().to_string());
                plan.add_slide(title);
            }
            ACTION_REMOVE => remove_slide(&mut plan)?,
            ACTION_COUNT => set_slide_count(&mut plan)?,
            ACTION_DISTRIBUTE => distribute(&mut plan)?,
            ACTION_SAVE => {
                plan.save(file)?;
                println!("{}", format!("Saved {}", file.display()).green());
                return Ok(());
            }
            _ => {
                println!("{}", "Changes discarded.".yellow());
                return Ok(());
            }
        }
    }
}

fn pick_slide(plan: &Plan, message: &str) -> Result<usize> {
    let labels: Vec<String> = plan
        .slides
        .iter()
        .map(|s| {
            format!(
                "{:>3}  {} ({})",
                s.number,
                s.title,
                display::budget(s.duration_seconds)
            )
        })
        .collect();
    let choice = Select::new(message, labels.clone()).prompt()?;
    // Labels are unique thanks to the leading number.
    Ok(labels.iter().position(|l| *l == choice).unwrap_or(0))
}

fn edit_slide(plan: &mut Plan) -> Result<()> {
    if plan.is_empty() {
        println!("{}", "Nothing to edit.".yellow());
        return Ok(());
    }
    let index = pick_slide(plan, "Which slide?")?;
    let (old_title, old_duration) = {
        let slide = &plan.slides[index];
        (slide.title.clone(), slide.duration_seconds)
    };

    let title = Text::new("Title:").with_initial_value(&old_title).prompt()?;
    let duration = Text::new("Budget (e.g. 90, 1m30s):")
        .with_initial_value(&old_duration.to_string())
        .prompt()?;
    let duration_seconds = match plan::parse_duration(&duration) {
        Ok(secs) => secs,
        Err(e) => {
            println!("{}", format!("{e:#} Keeping {old_duration}s.").yellow());
            old_duration
        }
    };

    let slide = &mut plan.slides[index];
    slide.title = title;
    slide.duration_seconds = duration_seconds;
    Ok(())
}

fn remove_slide(plan: &mut Plan) -> Result<()> {
    if plan.is_empty() {
        println!("{}", "Nothing to remove.".yellow());
        return Ok(());
    }
    let index = pick_slide(plan, "Remove which slide?")?;
    if let Some(removed) = plan.remove_slide(index) {
        println!("Removed \"{}\".", removed.title);
    }
    Ok(())
}

fn set_slide_count(plan: &mut Plan) -> Result<()> {
    let count = Text::new("Slide count:")
        .with_initial_value(&plan.len().to_string())
        .prompt()?;
    let count: usize = match count.trim().parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            println!("{}", "Slide count must be a number of at least 1.".yellow());
            return Ok(());
        }
    };
    // Keep the total steady across the resize, like redistributing after
    // changing the count in a form.
    let total = plan.total_seconds();
    plan.resize(count);
    if total > 0 {
        plan.distribute_evenly(total);
    }
    Ok(())
}

fn distribute(plan: &mut Plan) -> Result<()> {
    if plan.is_empty() {
        println!("{}", "The plan has no slides.".yellow());
        return Ok(());
    }
    let current_minutes = plan.total_seconds().div_ceil(60);
    let minutes = Text::new("Total time (minutes):")
        .with_initial_value(&current_minutes.to_string())
        .prompt()?;
    let minutes: u64 = match minutes.trim().parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            println!("{}", "Total time must be a number of at least 1.".yellow());
            return Ok(());
        }
    };
    plan.distribute_evenly(minutes * 60);
    Ok(())
}
