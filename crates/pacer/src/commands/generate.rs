use anyhow::{Context, Result};
use colored::Colorize;
use serde::Deserialize;
use std::path::Path;

use crate::commands::show;
use crate::config::{AiProvider, Config};
use crate::plan::{Plan, Slide};

/// One slide as returned by a provider.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedSlide {
    title: String,
    /// Providers occasionally return fractional seconds; rounded on import.
    duration_seconds: f64,
    #[serde(default)]
    #[allow(dead_code)]
    notes: Option<String>,
}

/// Draft a plan with the configured AI provider and write it to `file`.
///
/// Any failure (no provider, no key, transport error, malformed
/// response) means no plan was produced: the command reports it and an
/// existing plan file is left exactly as it was.
pub fn run(
    file: &Path,
    topic: &str,
    slides: Option<usize>,
    minutes: Option<u64>,
    force: bool,
    quiet: bool,
) -> Result<()> {
    if file.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to replace it.",
            file.display()
        );
    }

    let config = Config::load_or_default();
    let slide_count = slides.unwrap_or_else(|| config.default_slides());
    let total_minutes = minutes.unwrap_or_else(|| config.default_minutes());

    let ai = config.ai.as_ref().ok_or_else(|| {
        anyhow::anyhow!(
            "No AI provider configured.\n\
             \n\
             Run `pacer ai init`, or add to ~/.config/pacer/config.yaml:\n\
             \n\
             ai:\n\
             \x20 provider: gemini       # or open-ai\n\
             \x20 api_key: \"your-key\"    # or set GEMINI_API_KEY env var\n"
        )
    })?;
    let api_key = ai.resolve_api_key().ok_or_else(|| {
        let env_var = ai.provider.env_var_name();
        anyhow::anyhow!(
            "No API key found. Set it in config.yaml or via {env_var} environment variable."
        )
    })?;

    if !quiet {
        println!(
            "Drafting a {slide_count}-slide, {total_minutes}-minute plan about \"{topic}\" with {}...",
            ai.provider
        );
    }

    crate::output::debug(format!("provider {}, model {}", ai.provider, ai.model()));
    let prompt = build_prompt(topic, slide_count, total_minutes);
    crate::output::trace(&prompt);
    let generated = request_plan(&ai.provider, &api_key, ai.model(), &prompt)
        .context("No plan produced")?;

    let plan = Plan {
        title: Some(topic.to_string()),
        slides: generated
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                Slide::new(i + 1, s.title, s.duration_seconds.round().max(0.0) as u64)
            })
            .collect(),
    };
    plan.save(file)?;

    if !quiet {
        println!();
        show::print_plan(&plan);

        // Providers sometimes miss the target total; say so rather than
        // silently shipping a different talk length.
        let target = total_minutes * 60;
        let actual = plan.total_seconds();
        if actual.abs_diff(target) > 30 {
            println!(
                "{}",
                format!(
                    "Note: the drafted total differs from the requested {total_minutes} min. \
                     Use `pacer edit {}` to adjust.",
                    file.display()
                )
                .yellow()
            );
        }
        println!("{}", format!("Saved {}", file.display()).green());
    }
    Ok(())
}

fn build_prompt(topic: &str, slide_count: usize, total_minutes: u64) -> String {
    format!(
        "Create a presentation plan for a talk about \"{topic}\".\n\
         The presentation must have exactly {slide_count} slides.\n\
         The total duration must be exactly {total_minutes} minutes ({} seconds).\n\
         Distribute the time logically based on the complexity of typical slide \
         content (e.g. the intro is short, deep dives are long).\n\
         Return JSON of the form {{\"slides\": [{{\"title\": string, \
         \"durationSeconds\": number}}]}} and nothing else.",
        total_minutes * 60
    )
}

fn request_plan(
    provider: &AiProvider,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> Result<Vec<GeneratedSlide>> {
    let text = match provider {
        AiProvider::OpenAi => request_openai(api_key, model, prompt)?,
        AiProvider::Gemini => request_gemini(api_key, model, prompt)?,
    };
    parse_slides(&text)
}

/// Ask OpenAI's chat completions API for the plan JSON.
fn request_openai(api_key: &str, model: &str, prompt: &str) -> Result<String> {
    let body = serde_json::json!({
        "model": model,
        "messages": [{"role": "user", "content": prompt}],
        "response_format": {"type": "json_object"}
    });

    let response: serde_json::Value = ureq::post("https://api.openai.com/v1/chat/completions")
        .header("Authorization", &format!("Bearer {api_key}"))
        .header("Content-Type", "application/json")
        .send_json(&body)
        .context("Failed to call OpenAI API")?
        .body_mut()
        .read_json()
        .context("Failed to parse OpenAI response")?;

    response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("No content in OpenAI response"))
}

/// Ask Gemini's generateContent API for the plan JSON, constrained by a
/// response schema so the reply is machine-readable.
fn request_gemini(api_key: &str, model: &str, prompt: &str) -> Result<String> {
    let body = serde_json::json!({
        "contents": [{
            "parts": [{
                "text": prompt
            }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "slides": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "title": {"type": "STRING"},
                                "durationSeconds": {"type": "NUMBER"}
                            },
                            "required": ["title", "durationSeconds"]
                        }
                    }
                }
            }
        }
    });

    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent?key={api_key}"
    );

    let response: serde_json::Value = ureq::post(&url)
        .header("Content-Type", "application/json")
        .send_json(&body)
        .context("Failed to call Gemini API")?
        .body_mut()
        .read_json()
        .context("Failed to parse Gemini response")?;

    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("No content in Gemini response"))
}

/// Parse and validate the provider's `{"slides": [...]}` payload.
fn parse_slides(text: &str) -> Result<Vec<GeneratedSlide>> {
    #[derive(Deserialize)]
    struct GeneratedPlan {
        slides: Vec<GeneratedSlide>,
    }

    let plan: GeneratedPlan =
        serde_json::from_str(text).context("Response is not a valid plan")?;
    if plan.slides.is_empty() {
        anyhow::bail!("Response contains no slides");
    }
    if plan.slides.iter().any(|s| s.duration_seconds < 0.0) {
        anyhow::bail!("Response contains a negative slide duration");
    }
    Ok(plan.slides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_slides_accepts_the_contract_shape() {
        let text = r#"{
            "slides": [
                {"title": "Intro", "durationSeconds": 60},
                {"title": "Deep dive", "durationSeconds": 300.0, "notes": "demo here"}
            ]
        }"#;
        let slides = parse_slides(text).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title, "Intro");
        assert_eq!(slides[1].duration_seconds, 300.0);
    }

    #[test]
    fn parse_slides_rejects_empty_and_malformed() {
        assert!(parse_slides(r#"{"slides": []}"#).is_err());
        assert!(parse_slides("not json").is_err());
        assert!(parse_slides(r#"{"wrong": true}"#).is_err());
        assert!(
            parse_slides(r#"{"slides": [{"title": "X", "durationSeconds": -5}]}"#).is_err()
        );
    }

    #[test]
    fn prompt_pins_the_requested_shape() {
        let prompt = build_prompt("Rust", 10, 20);
        assert!(prompt.contains("exactly 10 slides"));
        assert!(prompt.contains("exactly 20 minutes (1200 seconds)"));
    }
}
