use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Starter plan shape when nothing is configured.
pub const DEFAULT_SLIDE_COUNT: usize = 10;
pub const DEFAULT_TOTAL_MINUTES: u64 = 20;

/// Budget given to a freshly added slide before any redistribution.
const NEW_SLIDE_SECONDS: u64 = 60;

/// One planned slide: a stable id for edit correlation, a 1-based
/// position, a title and a time budget in whole seconds.
///
/// The id never orders anything; the position in the plan does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: String,
    pub number: usize,
    pub title: String,
    pub duration_seconds: u64,
}

impl Slide {
    /// A slide with a freshly generated id.
    pub fn new(number: usize, title: String, duration_seconds: u64) -> Self {
        Self {
            id: new_slide_id(),
            number,
            title,
            duration_seconds,
        }
    }
}

/// The talk's timeline: slides in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Plan {
    /// An evenly distributed plan of `count` untitled slides sharing
    /// `total_seconds`.
    pub fn starter(count: usize, total_seconds: u64) -> Self {
        let per_slide = if count == 0 { 0 } else { total_seconds / count as u64 };
        let slides = (1..=count)
            .map(|n| Slide::new(n, format!("Slide {n}"), per_slide))
            .collect();
        Self {
            title: None,
            slides,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Sum of every slide's budget.
    pub fn total_seconds(&self) -> u64 {
        self.slides.iter().map(|s| s.duration_seconds).sum()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Restore the contiguous 1..N numbering after any reordering edit.
    pub fn renumber(&mut self) {
        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.number = i + 1;
        }
    }

    /// Append a slide with the default budget.
    pub fn add_slide(&mut self, title: Option<String>) {
        let number = self.slides.len() + 1;
        let title = title.unwrap_or_else(|| format!("Slide {number}"));
        self.slides.push(Slide::new(number, title, NEW_SLIDE_SECONDS));
    }

    /// Remove the slide at `index`, renumbering the rest.
    pub fn remove_slide(&mut self, index: usize) -> Option<Slide> {
        if index >= self.slides.len() {
            return None;
        }
        let removed = self.slides.remove(index);
        self.renumber();
        Some(removed)
    }

    /// Grow (with default-budget slides) or truncate to `count` slides.
    pub fn resize(&mut self, count: usize) {
        while self.slides.len() < count {
            self.add_slide(None);
        }
        self.slides.truncate(count);
        self.renumber();
    }

    /// Give every slide an equal share of `total_seconds` (floored, so
    /// the distributed total may come in slightly under).
    pub fn distribute_evenly(&mut self, total_seconds: u64) {
        if self.slides.is_empty() {
            return;
        }
        let per_slide = total_seconds / self.slides.len() as u64;
        for slide in &mut self.slides {
            slide.duration_seconds = per_slide;
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut plan: Plan = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        // Stored numbers may be stale after hand edits; position wins.
        plan.renumber();
        Ok(plan)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        let contents =
            format!("# pacer plan — one slide per entry, durations in whole seconds\n{yaml}");
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Opaque collision-resistant token for edit correlation.
fn new_slide_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}

/// Parse a human duration like `90`, `90s`, `5m` or `1m30s` into seconds.
pub fn parse_duration(input: &str) -> Result<u64> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(?:(\d+)\s*m)?\s*(?:(\d+)\s*s?)?\s*$").expect("static pattern")
    });

    let caps = re
        .captures(input)
        .ok_or_else(|| anyhow::anyhow!("Invalid duration: {input}. Use e.g. 90, 90s, 5m, 1m30s."))?;
    let minutes: u64 = caps.get(1).map_or(Ok(0), |m| m.as_str().parse())?;
    let seconds: u64 = caps.get(2).map_or(Ok(0), |m| m.as_str().parse())?;
    if caps.get(1).is_none() && caps.get(2).is_none() {
        anyhow::bail!("Invalid duration: {input}. Use e.g. 90, 90s, 5m, 1m30s.");
    }
    Ok(minutes * 60 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_distributes_total_evenly() {
        let plan = Plan::starter(DEFAULT_SLIDE_COUNT, DEFAULT_TOTAL_MINUTES * 60);
        assert_eq!(plan.len(), 10);
        assert!(plan.slides.iter().all(|s| s.duration_seconds == 120));
        assert_eq!(plan.total_seconds(), 1200);
        assert_eq!(plan.slides[0].number, 1);
        assert_eq!(plan.slides[9].number, 10);
    }

    #[test]
    fn slide_ids_are_distinct() {
        let plan = Plan::starter(20, 1200);
        let mut ids: Vec<&str> = plan.slides.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn remove_renumbers_contiguously() {
        let mut plan = Plan::starter(4, 480);
        let removed = plan.remove_slide(1).unwrap();
        assert_eq!(removed.number, 2);
        assert_eq!(plan.len(), 3);
        let numbers: Vec<usize> = plan.slides.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut plan = Plan::starter(2, 240);
        assert!(plan.remove_slide(5).is_none());
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn resize_grows_with_default_budget() {
        let mut plan = Plan::starter(2, 240);
        plan.resize(4);
        assert_eq!(plan.len(), 4);
        assert_eq!(plan.slides[3].number, 4);
        assert_eq!(plan.slides[3].duration_seconds, 60);
    }

    #[test]
    fn resize_truncates() {
        let mut plan = Plan::starter(5, 600);
        plan.resize(2);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.total_seconds(), 240);
    }

    #[test]
    fn distribute_evenly_floors_the_share() {
        let mut plan = Plan::starter(3, 300);
        plan.distribute_evenly(100);
        assert!(plan.slides.iter().all(|s| s.duration_seconds == 33));
        assert_eq!(plan.total_seconds(), 99);
    }

    #[test]
    fn load_renumbers_stale_positions() {
        let yaml = "slides:\n\
                    - id: aaaa\n  number: 7\n  title: One\n  duration_seconds: 60\n\
                    - id: bbbb\n  number: 3\n  title: Two\n  duration_seconds: 90\n";
        let mut plan: Plan = serde_yaml::from_str(yaml).unwrap();
        plan.renumber();
        assert_eq!(plan.slides[0].number, 1);
        assert_eq!(plan.slides[1].number, 2);
        assert_eq!(plan.slides[1].title, "Two");
        assert_eq!(plan.total_seconds(), 150);
    }

    #[test]
    fn parse_duration_forms() {
        assert_eq!(parse_duration("90").unwrap(), 90);
        assert_eq!(parse_duration("90s").unwrap(), 90);
        assert_eq!(parse_duration("5m").unwrap(), 300);
        assert_eq!(parse_duration("1m30s").unwrap(), 90);
        assert_eq!(parse_duration(" 2m 05s ").unwrap(), 125);
        assert_eq!(parse_duration("0").unwrap(), 0);
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("1h").is_err());
        assert!(parse_duration("-5").is_err());
    }
}
