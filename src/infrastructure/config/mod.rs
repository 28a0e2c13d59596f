//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub binance: BinanceConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    /// Longest message the chat transport accepts, in characters
    pub max_fragment_len: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BinanceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "ticker-bot".to_string(),
            max_fragment_len: 2000,
        }
    }
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.binance.com".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(url) = std::env::var("BINANCE_BASE_URL") {
            config.binance.base_url = url;
        }

        if let Some(len) = parse_env("BOT_MAX_FRAGMENT_LEN") {
            config.bot.max_fragment_len = len;
        }

        if let Some(secs) = parse_env("BINANCE_TIMEOUT_SECONDS") {
            config.binance.timeout_seconds = secs;
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.max_fragment_len == 0 {
            return Err(ConfigError::InvalidValue("max-fragment-len must be positive".to_string()));
        }
        if self.binance.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue("base-url must not be empty".to_string()));
        }
        if self.binance.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue("timeout-seconds must be positive".to_string()));
        }
        Ok(())
    }
}

fn parse_env<V: std::str::FromStr>(key: &str) -> Option<V> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}: not a number: {}", key, raw);
            None
        }
    }
}
