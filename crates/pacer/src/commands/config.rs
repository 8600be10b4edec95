use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    println!("{} {}", "Config file:".dimmed(), path.display());

    match Config::load() {
        Ok(config) => {
            let yaml = serde_yaml::to_string(&config)?;
            println!("{yaml}");
        }
        Err(_) => {
            let config = Config::default();
            println!("{}", "No config file yet; built-in defaults apply:".yellow());
            println!("  defaults.slides:       {}", config.default_slides());
            println!("  defaults.minutes:      {}", config.default_minutes());
            println!("  defaults.auto_advance: {}", config.default_auto_advance());
        }
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{}",
        format!("Set {key} = {value} in {}", path.display()).green()
    );
    Ok(())
}
