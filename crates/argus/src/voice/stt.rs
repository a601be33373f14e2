//! Speech-to-Text implementations

use async_trait::async_trait;
use tracing::{info, warn};

use super::{config::SttConfig, VoiceError, VoiceResult};

const DEEPGRAM_URL: &str = "https://api.deepgram.com/v1/listen";

/// Speech-to-Text trait
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe_audio(&self, audio: &[u8]) -> VoiceResult<String>;
    fn is_ready(&self) -> bool;
}

/// Deepgram REST implementation
#[derive(Debug)]
pub struct DeepgramStt {
    config: SttConfig,
    client: reqwest::Client,
}

impl DeepgramStt {
    pub fn new(config: SttConfig) -> Self {
        if config.api_key.is_none() {
            warn!("Deepgram created without API key - DEEPGRAM_API_KEY env var not found");
        }

        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SpeechToText for DeepgramStt {
    async fn transcribe_audio(&self, audio: &[u8]) -> VoiceResult<String> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            VoiceError::STTError("Deepgram API key not configured".to_string())
        })?;

        info!("transcribing {} bytes of audio", audio.len());

        let response = self
            .client
            .post(DEEPGRAM_URL)
            .query(&[
                ("model", self.config.model.as_str()),
                ("smart_format", "true"),
                ("punctuate", "true"),
                ("language", self.config.language.as_str()),
                ("detect_language", "false"),
            ])
            .header("Authorization", format!("Token {}", api_key))
            .header("Content-Type", "audio/webm")
            .body(audio.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::STTError(format!(
                "Deepgram API error: {} {}",
                status, body
            )));
        }

        let data: serde_json::Value = response.json().await?;

        let transcript = data["results"]["channels"][0]["alternatives"][0]["transcript"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        info!("transcript: {}", transcript);

        Ok(transcript)
    }

    fn is_ready(&self) -> bool {
        self.config.api_key.is_some()
    }
}
