use anyhow::Result;
use colored::Colorize;
use inquire::{Password, PasswordDisplayMode, Select};

use crate::cli::AiCommands;
use crate::config::{AiConfig, Config};

pub fn run(command: AiCommands) -> Result<()> {
    match command {
        AiCommands::Init => init(),
        AiCommands::Status => status(),
        AiCommands::Remove => remove(),
    }
}

/// Pick a provider and optionally store an API key.
fn init() -> Result<()> {
    let provider = Select::new(
        "AI provider for plan generation:",
        crate::config::AiProvider::all().to_vec(),
    )
    .prompt()?;

    let key_prompt = format!(
        "API key (leave empty to use the {} environment variable):",
        provider.env_var_name()
    );
    let api_key = Password::new(&key_prompt)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    let api_key = (!api_key.trim().is_empty()).then(|| api_key.trim().to_string());

    let mut config = Config::load_or_default();
    config.ai = Some(AiConfig {
        provider,
        api_key,
        model: None,
    });
    let path = config.save()?;

    println!(
        "{}",
        format!("AI configuration saved to {}", path.display()).green()
    );
    println!("Draft a plan with `pacer generate talk.yaml --topic \"...\"`.");
    Ok(())
}

/// Show the configured provider and where its key comes from.
fn status() -> Result<()> {
    let config = Config::load_or_default();
    let Some(ai) = &config.ai else {
        println!(
            "{}",
            "No AI provider configured. Run `pacer ai init` to set one up.".yellow()
        );
        return Ok(());
    };

    println!("Provider: {}", ai.provider.to_string().bold());
    println!("Model:    {}", ai.model());
    let key_source = if ai.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
        "config file".to_string()
    } else if std::env::var(ai.provider.env_var_name()).is_ok() {
        format!("{} environment variable", ai.provider.env_var_name())
    } else {
        format!(
            "missing, set {} or re-run `pacer ai init`",
            ai.provider.env_var_name()
        )
        .red()
        .to_string()
    };
    println!("API key:  {key_source}");
    Ok(())
}

fn remove() -> Result<()> {
    let mut config = Config::load_or_default();
    if config.ai.take().is_none() {
        println!("{}", "No AI configuration to remove.".yellow());
        return Ok(());
    }
    config.save()?;
    println!("{}", "AI configuration removed.".green());
    Ok(())
}
