use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonitorConfig {
    pub telegram: TelegramConfig,
    pub websites: Vec<String>,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

impl MonitorConfig {
    /// Reads and parses the config file. A missing or malformed config is a
    /// fatal startup error; nothing else in the pipeline is allowed to be.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: MonitorConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let raw = r#"{
            "telegram": {"bot_token": "123:abc", "chat_id": "42"},
            "websites": ["https://a.test", "https://b.test"],
            "settings": {"timeout_seconds": 10}
        }"#;
        let config: MonitorConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.websites.len(), 2);
        assert_eq!(config.telegram.chat_id, "42");
        assert_eq!(config.settings.timeout_seconds, 10);
    }

    #[test]
    fn timeout_defaults_to_thirty_seconds() {
        let raw = r#"{
            "telegram": {"bot_token": "t", "chat_id": "c"},
            "websites": []
        }"#;
        let config: MonitorConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.settings.timeout_seconds, 30);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(MonitorConfig::load("/nonexistent/config.json").is_err());
    }
}
