pub mod ollama;
pub mod provider_trait;

pub use ollama::OllamaProvider;
pub use provider_trait::{CompletionProvider, ProviderError};
