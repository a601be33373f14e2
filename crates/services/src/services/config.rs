//! Runtime configuration
//!
//! Stored as JSON in the asset directory. Environment variables override
//! file values so deployments can inject secrets and service endpoints
//! without editing the file on disk.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use ts_rs::TS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct SttSettings {
    /// Deepgram API key. Usually supplied via DEEPGRAM_API_KEY instead of
    /// the file.
    pub api_key: Option<String>,
    pub model: String,
    pub language: String,
}

impl Default for SttSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "nova-2".to_string(),
            language: "en-IN".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "qwen2:1b".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct VisionSettings {
    pub base_url: String,
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
pub struct Config {
    pub stt: SttSettings,
    pub llm: LlmSettings,
    pub vision: VisionSettings,
}

impl Config {
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("DEEPGRAM_API_KEY") {
            if !key.is_empty() {
                self.stt.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
            if !url.is_empty() {
                self.llm.base_url = url;
            }
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            if !model.is_empty() {
                self.llm.model = model;
            }
        }
        if let Ok(url) = std::env::var("VISION_BASE_URL") {
            if !url.is_empty() {
                self.vision.base_url = url;
            }
        }
    }
}

/// Read the config file, falling back to defaults when it is absent or
/// unreadable, then layer environment overrides on top.
pub async fn load_config_from_file(path: &Path) -> Config {
    let mut config = match tokio::fs::read_to_string(path).await {
        Ok(raw) => match serde_json::from_str::<Config>(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Invalid config file, falling back to defaults: {}", e);
                Config::default()
            }
        },
        Err(_) => Config::default(),
    };

    config.apply_env_overrides();
    config
}

pub async fn save_config_to_file(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let raw = serde_json::to_string_pretty(config)?;
    tokio::fs::write(path, raw).await?;
    Ok(())
}
