use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, execute};
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::display;
use crate::plan::Plan;
use crate::timer::{AdvanceMode, ClockMode, Drift, Session, Snapshot};

/// How long to block on key input before re-checking the tick deadline.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Slide time left below which the countdown is shown as a warning.
const WARN_THRESHOLD_SECS: f64 = 30.0;

/// Run the timer console for a plan file.
pub fn run(file: &Path, auto: bool, start_slide: Option<usize>, quiet: bool) -> Result<()> {
    let plan = Plan::load(file)?;
    let auto = auto || Config::load_or_default().default_auto_advance();
    let advance = if auto {
        AdvanceMode::Auto
    } else {
        AdvanceMode::Manual
    };
    let mut session = Session::new(plan, advance);
    crate::output::debug(format!(
        "loaded {} slide(s), {} planned, {} navigation",
        session.plan().len(),
        display::budget(session.plan().total_seconds()),
        if auto { "auto" } else { "manual" }
    ));

    // An empty plan fails here, before the terminal is touched.
    session.start(Instant::now())?;

    if let Some(n) = start_slide {
        if auto {
            if !quiet {
                eprintln!("{}", "--slide is ignored in auto mode".yellow());
            }
        } else if n >= 1 {
            let _ = session.change_slide(n as i64 - 1);
        }
    }

    if !quiet {
        println!(
            "{} space pause/resume · ←/→ change slide · q stop",
            "keys:".dimmed()
        );
    }

    terminal::enable_raw_mode().context("Failed to enable raw terminal mode")?;
    let outcome = console_loop(&mut session);
    terminal::disable_raw_mode().ok();
    println!();

    let elapsed = outcome?;
    if !quiet {
        println!(
            "{} elapsed {} of {} planned",
            "stopped:".bold(),
            display::mmss(elapsed),
            display::budget(session.plan().total_seconds())
        );
    }
    Ok(())
}

/// Interleave key handling with the periodic tick until the operator
/// stops the run. Returns the elapsed seconds at the moment of stopping.
fn console_loop(session: &mut Session) -> Result<f64> {
    let mut stdout = io::stdout();
    let mut shown_slide: Option<usize> = None;
    let mut dirty = true;

    loop {
        let now = Instant::now();
        if session.poll(now) {
            dirty = true;
        }
        let snapshot = session.snapshot(now);

        let current = session.current_slide();
        if shown_slide != Some(current) {
            announce_slide(&mut stdout, session.plan(), current)?;
            shown_slide = Some(current);
            dirty = true;
        }

        if dirty {
            draw_status(&mut stdout, &snapshot)?;
            dirty = false;
        }

        // Wake up for the tick deadline if it lands before the idle poll.
        let timeout = session
            .until_next_tick(now)
            .map_or(INPUT_POLL, |until| until.min(INPUT_POLL));
        if !event::poll(timeout)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let now = Instant::now();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                let elapsed = session.snapshot(now).elapsed_seconds;
                session.stop();
                return Ok(elapsed);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let elapsed = session.snapshot(now).elapsed_seconds;
                session.stop();
                return Ok(elapsed);
            }
            KeyCode::Char(' ') => {
                match session.mode() {
                    ClockMode::Running => {
                        let _ = session.pause(now);
                    }
                    ClockMode::Paused => {
                        let _ = session.resume(now);
                    }
                    _ => {}
                }
                dirty = true;
            }
            KeyCode::Right | KeyCode::Char('n') => {
                // Rejected in auto mode; the status line already says so.
                let _ = session.change_slide(1);
                dirty = true;
            }
            KeyCode::Left | KeyCode::Char('p') => {
                let _ = session.change_slide(-1);
                dirty = true;
            }
            _ => {}
        }
    }
}

/// Print a header line when the current slide changes, scrolling the
/// previous status line into history.
fn announce_slide(stdout: &mut io::Stdout, plan: &Plan, index: usize) -> Result<()> {
    let Some(slide) = plan.get(index) else {
        return Ok(());
    };
    execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    write!(
        stdout,
        "{} {}\r\n",
        format!("{}/{}  {}", slide.number, plan.len(), slide.title).bold(),
        format!("(budget {})", display::budget(slide.duration_seconds)).dimmed()
    )?;
    stdout.flush()?;
    Ok(())
}

/// Redraw the single live status line in place.
fn draw_status(stdout: &mut io::Stdout, snapshot: &Snapshot) -> Result<()> {
    execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    write!(stdout, "{}", status_line(snapshot))?;
    stdout.flush()?;
    Ok(())
}

fn status_line(snap: &Snapshot) -> String {
    let state = match snap.mode {
        ClockMode::Paused => "⏸ paused".yellow().bold().to_string(),
        _ if snap.auto_advance => "▶ auto".blue().bold().to_string(),
        _ => "▶".green().bold().to_string(),
    };

    let slide_left = snap.slide_remaining_seconds;
    let slide_part = if slide_left < 0.0 {
        format!("over by {}", display::mmss(slide_left.abs()))
            .red()
            .bold()
            .to_string()
    } else if slide_left < WARN_THRESHOLD_SECS {
        display::mmss(slide_left).yellow().bold().to_string()
    } else {
        display::mmss(slide_left)
    };

    let global = snap.global_remaining_seconds;
    let talk_part = if global < 0.0 {
        display::mmss(global).red().to_string()
    } else {
        display::mmss(global)
    };

    let percent = match snap.progress {
        Some(p) => format!(" ({:.0}%)", p * 100.0),
        None => String::new(),
    };

    format!(
        "{state}  slide {slide_part} · talk {talk_part}{percent} · ends {}{}",
        ends_at(global),
        pace_part(snap)
    )
}

/// Estimated wall-clock end of the talk at the current pace.
fn ends_at(global_remaining_seconds: f64) -> String {
    let end = Local::now() + chrono::Duration::seconds(global_remaining_seconds as i64);
    end.format("%H:%M").to_string()
}

fn pace_part(snap: &Snapshot) -> String {
    let Some(report) = snap.drift else {
        return String::new();
    };
    let offset = report
        .offset_seconds
        .map(|s| format!(" ({})", display::signed_seconds(s)))
        .unwrap_or_default();
    match report.drift {
        Drift::OnTime => format!(" · {}", "on pace".green()),
        Drift::Behind => {
            let should_be = snap.ideal_slide + 1;
            format!(
                " · {}",
                format!("behind, should be on slide {should_be}{offset}").red()
            )
        }
        Drift::Ahead => format!(" · {}", format!("ahead of plan{offset}").blue()),
    }
}
