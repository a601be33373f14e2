//! Command normalization
//!
//! Folds the keyword fast path and raw language-model output into a single
//! canonical [`Command`]. Total by construction: malformed model output is a
//! no-match, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::command::{keyword_match, ActionKind, Command};

/// Greedy first-`{` to last-`}` extraction, matching across newlines.
static JSON_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// Normalize raw model output plus the originating transcript into a command.
///
/// The keyword rules run FIRST whenever a transcript is supplied — small
/// local models are unreliable with multi-word names, and the rules are both
/// faster and more accurate on the common commands. Model output is only
/// consulted when the rules come up empty.
pub fn interpret(raw_output: &str, transcript: &str) -> Command {
    let cleaned = raw_output.trim().replace("```json", "").replace("```", "");

    if !transcript.is_empty() {
        if let Some(command) = keyword_match(transcript) {
            if command.action != ActionKind::Unknown {
                debug!("keyword rule matched action {}", command.action);
                return command;
            }
        }
    }

    let mut retry = false;
    match JSON_OBJECT.find(&cleaned) {
        Some(object) => match serde_json::from_str::<serde_json::Value>(object.as_str()) {
            Ok(value) => {
                if let Some(command) = command_from_model_value(&value) {
                    return command;
                }
            }
            Err(e) => {
                warn!("model output JSON did not parse: {}", e);
                retry = true;
            }
        },
        None => retry = true,
    }

    // Last resort: the keyword table once more.
    if retry && !transcript.is_empty() {
        if let Some(command) = keyword_match(transcript) {
            return command;
        }
    }

    Command::unknown()
}

/// Map a parsed model object into the canonical command shape. Anything the
/// enum does not recognize — including an explicit `"unknown"` — is a miss.
fn command_from_model_value(value: &serde_json::Value) -> Option<Command> {
    let action = value
        .get("action")
        .and_then(|a| a.as_str())
        .unwrap_or("unknown")
        .parse::<ActionKind>()
        .unwrap_or(ActionKind::Unknown);

    if action == ActionKind::Unknown {
        return None;
    }

    let field = |key: &str| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    };

    Some(Command {
        action,
        camera_id: field("camera_id"),
        camera_name: field("camera_name"),
        place_name: field("place_name"),
        object: field("object"),
        intent: field("intent"),
    })
}
