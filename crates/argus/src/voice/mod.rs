//! Voice input for Argus
//!
//! Speech-to-text lives behind the [`SpeechToText`] trait; Deepgram's REST
//! API is the shipping implementation. An empty transcript is the caller's
//! signal that no command is available.

pub mod config;
pub mod stt;

pub use config::SttConfig;
pub use stt::{DeepgramStt, SpeechToText};

/// Voice processing errors
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("STT error: {0}")]
    STTError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type VoiceResult<T> = Result<T, VoiceError>;
