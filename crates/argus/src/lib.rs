//! # Argus — Voice-driven camera assistant
//!
//! Turns a spoken or typed transcript into a structured command and runs it
//! against the camera/place catalog.
//!
//! ## Architecture
//!
//! ```text
//! transcript ──► keyword rules (command) ──► Command ──► CommandExecutor
//!        │                                                   │
//!        └──► language model (brain) ──► interpret (parser)  ├──► catalog (db)
//!                                                            └──► vision service
//! ```
//!
//! The keyword table is tried before the model on purpose: deterministic
//! matching in microseconds beats a small local model on short, frequent
//! commands. The model only sees transcripts the rules cannot place.

pub mod brain;
pub mod command;
pub mod context;
pub mod executor;
pub mod parser;
pub mod vision;
pub mod voice;

#[cfg(test)]
mod command_tests;
#[cfg(test)]
mod parser_tests;

pub use brain::{CompletionProvider, OllamaProvider, ProviderError, SYSTEM_PROMPT};
pub use command::{keyword_match, ActionKind, Command, KEYWORD_RULES};
pub use context::{ContextStore, DEFAULT_SESSION};
pub use executor::{resolve_camera, CommandExecutor, CommandOutput, ExecutionResult};
pub use parser::interpret;
pub use vision::{HttpVisionAnalyzer, VisionAnalyzer};
pub use voice::{DeepgramStt, SpeechToText, SttConfig, VoiceError, VoiceResult};
