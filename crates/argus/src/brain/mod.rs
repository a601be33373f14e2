//! Language-model fallback for command interpretation
//!
//! Only consulted when the keyword table cannot place a transcript. The
//! provider returns raw text; nothing downstream assumes it is well-formed
//! JSON.

pub mod providers;

pub use providers::{CompletionProvider, OllamaProvider, ProviderError};

/// Instructions handed to the model for every fallback call.
pub const SYSTEM_PROMPT: &str = r#"You convert voice commands for a camera monitoring system into JSON.
Respond with a single JSON object and nothing else:
{"action": "...", "camera_id": null, "camera_name": null, "place_name": null, "object": null, "intent": null}

"action" must be one of: show_camera, show_place, add_camera, add_place,
analyze_camera, detect_person, describe_scene, detect_motion, count_objects,
unknown.

Fill camera_name or place_name with the name the user spoke, exactly as
spoken. Use null for anything you cannot fill. If the request is not about
cameras or places, use {"action": "unknown"}."#;
