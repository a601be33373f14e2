//! Provider trait and common types for LLM fallback support

use async_trait::async_trait;

/// Error type for provider operations
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Trait every completion backend must implement. Kept deliberately narrow:
/// one system prompt, one user turn, raw text back.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging/display
    fn name(&self) -> &'static str;

    /// Whether this provider is properly configured and ready
    fn is_configured(&self) -> bool;

    /// Send a single-turn request and return the model's raw text output.
    async fn complete(&self, system_prompt: &str, user_text: &str)
        -> Result<String, ProviderError>;
}
