//! Configuration settings for Qrium.
//!
//! Tunables (endpoints, result caps, model parameters) live in a TOML file;
//! credentials are picked up from the environment after the file is loaded
//! and always win over file values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub llm: LlmSettings,
    pub video: VideoSettings,
    pub websearch: WebSearchSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// LLM completion source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// API key; usually supplied via CEREBRAS_API_KEY.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible chat-completion API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Output token cap.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.cerebras.ai/v1".to_string(),
            model: "llama3.1-8b".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            timeout_seconds: 20,
        }
    }
}

/// Video search source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    /// YouTube Data API key; usually supplied via YOUTUBE_API_KEY.
    pub api_key: Option<String>,
    /// Base URL of the YouTube Data API.
    pub base_url: String,
    /// Maximum number of videos per query.
    pub max_results: u32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            max_results: 5,
            timeout_seconds: 20,
        }
    }
}

/// Web search source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSearchSettings {
    /// Google Custom Search API key; usually supplied via GOOGLE_API_KEY.
    pub api_key: Option<String>,
    /// Custom search engine identifier; usually supplied via GOOGLE_CX.
    pub engine_id: Option<String>,
    /// Base URL of the Custom Search API.
    pub base_url: String,
    /// Maximum number of results per query.
    pub max_results: u32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for WebSearchSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            engine_id: None,
            base_url: "https://www.googleapis.com/customsearch/v1".to_string(),
            max_results: 5,
            timeout_seconds: 20,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file, then apply
    /// environment overrides.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or the default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.apply_env_from(|name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Apply credential overrides from a name-to-value lookup.
    ///
    /// Empty values are ignored so a blank exported variable does not shadow
    /// a key set in the config file.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(key) = get("CEREBRAS_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(key) = get("YOUTUBE_API_KEY") {
            self.video.api_key = Some(key);
        }
        if let Some(key) = get("GOOGLE_API_KEY") {
            self.websearch.api_key = Some(key);
        }
        if let Some(cx) = get("GOOGLE_CX") {
            self.websearch.engine_id = Some(cx);
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::QriumError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("qrium")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_parameters() {
        let settings = Settings::default();
        assert_eq!(settings.llm.model, "llama3.1-8b");
        assert_eq!(settings.llm.max_tokens, 1000);
        assert_eq!(settings.video.max_results, 5);
        assert_eq!(settings.websearch.max_results, 5);
        assert!(settings.llm.api_key.is_none());
        assert!(settings.websearch.engine_id.is_none());
    }

    #[test]
    fn env_overrides_take_precedence() {
        let mut settings = Settings::default();
        settings.llm.api_key = Some("from-file".to_string());

        settings.apply_env_from(|name| match name {
            "CEREBRAS_API_KEY" => Some("from-env".to_string()),
            "GOOGLE_CX" => Some("engine-42".to_string()),
            _ => None,
        });

        assert_eq!(settings.llm.api_key.as_deref(), Some("from-env"));
        assert_eq!(settings.websearch.engine_id.as_deref(), Some("engine-42"));
        assert!(settings.video.api_key.is_none());
    }

    #[test]
    fn empty_env_values_do_not_shadow_file_values() {
        let mut settings = Settings::default();
        settings.llm.api_key = Some("from-file".to_string());

        settings.apply_env_from(|name| match name {
            "CEREBRAS_API_KEY" => Some(String::new()),
            _ => None,
        });

        assert_eq!(settings.llm.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn settings_roundtrip_through_toml() {
        let mut settings = Settings::default();
        settings.video.max_results = 3;
        settings.general.log_level = "debug".to_string();

        let encoded = toml::to_string_pretty(&settings).unwrap();
        let decoded: Settings = toml::from_str(&encoded).unwrap();

        assert_eq!(decoded.video.max_results, 3);
        assert_eq!(decoded.general.log_level, "debug");
    }
}
