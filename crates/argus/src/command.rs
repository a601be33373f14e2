//! Keyword command classification
//!
//! Maps a transcript onto a fixed set of actions using ordered keyword-set
//! rules, then extracts the residual entity name from whatever tokens the
//! rule and stop-word set leave behind.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Everything the system can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    ShowCamera,
    ShowPlace,
    AddCamera,
    AddPlace,
    AnalyzeCamera,
    DetectPerson,
    DescribeScene,
    DetectMotion,
    CountObjects,
    Unknown,
}

impl ActionKind {
    /// Actions that route to the vision collaborator and participate in the
    /// last-camera context.
    pub fn is_vision(&self) -> bool {
        matches!(
            self,
            ActionKind::AnalyzeCamera
                | ActionKind::DetectPerson
                | ActionKind::DescribeScene
                | ActionKind::DetectMotion
                | ActionKind::CountObjects
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::ShowCamera => "show_camera",
            ActionKind::ShowPlace => "show_place",
            ActionKind::AddCamera => "add_camera",
            ActionKind::AddPlace => "add_place",
            ActionKind::AnalyzeCamera => "analyze_camera",
            ActionKind::DetectPerson => "detect_person",
            ActionKind::DescribeScene => "describe_scene",
            ActionKind::DetectMotion => "detect_motion",
            ActionKind::CountObjects => "count_objects",
            ActionKind::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show_camera" => Ok(ActionKind::ShowCamera),
            "show_place" => Ok(ActionKind::ShowPlace),
            "add_camera" => Ok(ActionKind::AddCamera),
            "add_place" => Ok(ActionKind::AddPlace),
            "analyze_camera" => Ok(ActionKind::AnalyzeCamera),
            "detect_person" => Ok(ActionKind::DetectPerson),
            "describe_scene" => Ok(ActionKind::DescribeScene),
            "detect_motion" => Ok(ActionKind::DetectMotion),
            "count_objects" => Ok(ActionKind::CountObjects),
            "unknown" => Ok(ActionKind::Unknown),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

/// One interpreted request. Built fresh per transcript, consumed once by the
/// executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Command {
    pub action: ActionKind,
    pub camera_id: Option<String>,
    pub camera_name: Option<String>,
    pub place_name: Option<String>,
    pub object: Option<String>,
    pub intent: Option<String>,
}

impl Command {
    pub fn unknown() -> Self {
        Self {
            action: ActionKind::Unknown,
            camera_id: None,
            camera_name: None,
            place_name: None,
            object: None,
            intent: None,
        }
    }
}

/// Ordered rule table: the first rule whose every keyword appears in the
/// transcript wins. The bare `open`/`show` catch-alls MUST stay last so the
/// specific multi-keyword rules above them take priority.
pub const KEYWORD_RULES: &[(&[&str], ActionKind)] = &[
    // add_camera: "add camera", "add a new camera", "new camera"
    (&["add", "camera"], ActionKind::AddCamera),
    (&["new", "camera"], ActionKind::AddCamera),
    // add_place: "add place", "add a new place", "new place"
    (&["add", "place"], ActionKind::AddPlace),
    (&["new", "place"], ActionKind::AddPlace),
    // show_camera: "show camera", "open camera", "display camera"
    (&["show", "camera"], ActionKind::ShowCamera),
    (&["open", "camera"], ActionKind::ShowCamera),
    (&["display", "camera"], ActionKind::ShowCamera),
    // show_place: "show place", "cameras in/at <place>"
    (&["show", "place"], ActionKind::ShowPlace),
    (&["cameras", "in"], ActionKind::ShowPlace),
    (&["cameras", "at"], ActionKind::ShowPlace),
    // analyze_camera
    (&["analyze"], ActionKind::AnalyzeCamera),
    (&["what", "happening"], ActionKind::AnalyzeCamera),
    (&["what's", "happening"], ActionKind::AnalyzeCamera),
    // detect_person
    (&["detect", "person"], ActionKind::DetectPerson),
    (&["any", "person"], ActionKind::DetectPerson),
    (&["anyone"], ActionKind::DetectPerson),
    (&["somebody"], ActionKind::DetectPerson),
    // detect_motion
    (&["detect", "motion"], ActionKind::DetectMotion),
    (&["any", "motion"], ActionKind::DetectMotion),
    (&["movement"], ActionKind::DetectMotion),
    // count_objects
    (&["count"], ActionKind::CountObjects),
    (&["how", "many"], ActionKind::CountObjects),
    // describe_scene
    (&["describe"], ActionKind::DescribeScene),
    (&["what", "see"], ActionKind::DescribeScene),
    (&["what", "going", "on"], ActionKind::DescribeScene),
    // Generic fallback: just "open" or "show" without a "camera" keyword
    (&["open"], ActionKind::ShowCamera),
    (&["show"], ActionKind::ShowCamera),
];

/// Tokens that never belong to a place or camera name.
static ENTITY_STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "add", "new", "a", "the", "camera", "place", "show", "open", "display", "detect",
        "person", "motion", "count", "describe", "scene", "analyze", "what", "is", "happening",
        "in", "at", "to", "on", "for", "my", "please", "can", "you", "hey", "ok", "okay", "any",
        "are", "there", "how", "many", "an", "of", "from", "going", "see", "what's", "anyone",
        "somebody",
    ]
    .into_iter()
    .collect()
});

/// Try to match the transcript against the keyword rule table.
///
/// Returns `None` when no rule matches; the caller then falls through to the
/// language model.
pub fn keyword_match(transcript: &str) -> Option<Command> {
    let normalized = transcript.to_lowercase();
    let normalized = normalized.trim().trim_end_matches(['.', '!', '?']);
    let words: Vec<&str> = normalized.split_whitespace().collect();

    for (keywords, action) in KEYWORD_RULES {
        if keywords.iter().all(|kw| words.contains(kw)) {
            let entity_name = extract_entity_name(&words, keywords);
            return Some(build_command(*action, entity_name));
        }
    }

    None
}

/// Derive the residual entity name from the transcript tokens.
///
/// Two removals are tried: the broad one drops every stop word, the narrow
/// one additionally drops this rule's own keywords, which preserves
/// multi-word names like "sri lakshmi narayan". The narrow result wins when
/// it is non-empty and at least as long as the broad one (ties go narrow).
fn extract_entity_name(words: &[&str], rule_keywords: &[&str]) -> Option<String> {
    let broad = words
        .iter()
        .copied()
        .filter(|w| !ENTITY_STOP_WORDS.contains(w))
        .collect::<Vec<_>>()
        .join(" ");

    let narrow = words
        .iter()
        .copied()
        .filter(|w| !ENTITY_STOP_WORDS.contains(w) && !rule_keywords.contains(w))
        .collect::<Vec<_>>()
        .join(" ");

    let name = if !narrow.is_empty() && (broad.is_empty() || narrow.len() >= broad.len()) {
        narrow
    } else {
        broad
    };

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn build_command(action: ActionKind, entity_name: Option<String>) -> Command {
    let mut command = Command {
        action,
        ..Command::unknown()
    };

    match action {
        ActionKind::ShowCamera => {
            command.camera_id = entity_name.clone();
            command.camera_name = entity_name;
        }
        ActionKind::ShowPlace | ActionKind::AddPlace => {
            command.place_name = entity_name;
        }
        ActionKind::AddCamera => {
            command.camera_name = entity_name;
        }
        action if action.is_vision() => {
            command.camera_name = entity_name;
        }
        _ => {}
    }

    command
}
