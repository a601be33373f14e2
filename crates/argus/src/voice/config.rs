use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct SttConfig {
    /// Deepgram API key; transcription fails without one.
    pub api_key: Option<String>,
    pub model: String,
    pub language: String,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "nova-2".to_string(),
            language: "en-IN".to_string(),
        }
    }
}
