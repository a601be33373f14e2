//! Ollama provider implementation (local LLM)

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::provider_trait::{CompletionProvider, ProviderError};

/// Ollama chat API provider. No API key; anything listening on the base URL
/// with the configured model pulled will do.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let model = model.into();
        info!("Ollama provider initialized ({} / {})", base_url, model);

        Self {
            client: Client::new(),
            base_url,
            model,
        }
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, ProviderError> {
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_text },
            ],
            "stream": false,
        });

        debug!("Ollama request for model {}", self.model);

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError { status, message });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(json["message"]["content"].as_str().unwrap_or("{}").to_string())
    }
}
