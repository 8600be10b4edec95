use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "pacer";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Slide count for new plans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slides: Option<usize>,

    /// Total talk length in minutes for new plans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,

    /// Let the clock drive the slide position by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_advance: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub provider: AiProvider,

    /// API key. If not set, falls back to the provider's environment
    /// variable (OPENAI_API_KEY for openai, GEMINI_API_KEY for gemini).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiProvider {
    #[default]
    OpenAi,
    Gemini,
}

impl AiProvider {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Google Gemini",
        }
    }

    pub fn env_var_name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Gemini => "gemini-2.5-flash",
        }
    }

    pub fn all() -> &'static [AiProvider] {
        &[AiProvider::OpenAi, AiProvider::Gemini]
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl AiConfig {
    /// Resolve the API key from config or environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var(self.provider.env_var_name()).ok()
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(self.provider.default_model())
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `pacer config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# Pacer configuration — https://github.com/mklab-se/pacer\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn default_slides(&self) -> usize {
        self.defaults
            .as_ref()
            .and_then(|d| d.slides)
            .unwrap_or(crate::plan::DEFAULT_SLIDE_COUNT)
    }

    pub fn default_minutes(&self) -> u64 {
        self.defaults
            .as_ref()
            .and_then(|d| d.minutes)
            .unwrap_or(crate::plan::DEFAULT_TOTAL_MINUTES)
    }

    pub fn default_auto_advance(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.auto_advance)
            .unwrap_or(false)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.slides" => {
                let slides: usize = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid slide count: {value}"))?;
                if slides == 0 {
                    anyhow::bail!("Invalid slide count: {value}. Must be at least 1.");
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .slides = Some(slides);
            }
            "defaults.minutes" => {
                let minutes: u64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid minute count: {value}"))?;
                if minutes == 0 {
                    anyhow::bail!("Invalid minute count: {value}. Must be at least 1.");
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .minutes = Some(minutes);
            }
            "defaults.auto_advance" => {
                let auto = match value {
                    "true" | "on" => true,
                    "false" | "off" => false,
                    _ => anyhow::bail!(
                        "Invalid auto_advance: {value}. Must be 'true' or 'false'."
                    ),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .auto_advance = Some(auto);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.slides, defaults.minutes, defaults.auto_advance"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_valid_keys() {
        let mut config = Config::default();
        config.set("defaults.slides", "12").unwrap();
        config.set("defaults.minutes", "45").unwrap();
        config.set("defaults.auto_advance", "true").unwrap();
        assert_eq!(config.default_slides(), 12);
        assert_eq!(config.default_minutes(), 45);
        assert!(config.default_auto_advance());
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.slides", "0").is_err());
        assert!(config.set("defaults.minutes", "soon").is_err());
        assert!(config.set("defaults.auto_advance", "maybe").is_err());
        assert!(config.set("defaults.theme", "dark").is_err());
    }

    #[test]
    fn builtin_defaults_apply_when_unset() {
        let config = Config::default();
        assert_eq!(config.default_slides(), 10);
        assert_eq!(config.default_minutes(), 20);
        assert!(!config.default_auto_advance());
    }

    #[test]
    fn api_key_prefers_config_over_env() {
        let ai = AiConfig {
            provider: AiProvider::Gemini,
            api_key: Some("from-config".into()),
            model: None,
        };
        assert_eq!(ai.resolve_api_key().as_deref(), Some("from-config"));
        assert_eq!(ai.model(), "gemini-2.5-flash");
    }
}
