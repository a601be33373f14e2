//! Unit tests for command normalization

#[cfg(test)]
mod tests {
    use crate::command::ActionKind;
    use crate::parser::interpret;

    #[test]
    fn fast_path_ignores_model_output_entirely() {
        let transcript = "add a new camera gate cam";

        let from_garbage = interpret("complete nonsense", transcript);
        let from_json = interpret(
            r#"{"action": "show_place", "place_name": "somewhere else"}"#,
            transcript,
        );
        let from_empty = interpret("", transcript);

        assert_eq!(from_garbage.action, ActionKind::AddCamera);
        assert_eq!(from_garbage, from_json);
        assert_eq!(from_garbage, from_empty);
        assert_eq!(from_garbage.camera_name.as_deref(), Some("gate cam"));
    }

    #[test]
    fn fenced_model_output_parses_without_transcript() {
        let raw = "```json\n{\"action\": \"show_camera\", \"camera_name\": \"Gate Cam\"}\n```";
        let command = interpret(raw, "");

        assert_eq!(command.action, ActionKind::ShowCamera);
        assert_eq!(command.camera_name.as_deref(), Some("Gate Cam"));
        assert!(command.place_name.is_none());
    }

    #[test]
    fn json_is_extracted_from_surrounding_prose() {
        let raw = r#"Sure! Here is the command you asked for:
{"action": "detect_person", "camera_name": "lobby"}"#;
        let command = interpret(raw, "");

        assert_eq!(command.action, ActionKind::DetectPerson);
        assert_eq!(command.camera_name.as_deref(), Some("lobby"));
    }

    #[test]
    fn malformed_output_with_empty_transcript_is_unknown() {
        let command = interpret("not json at all", "");
        assert_eq!(command.action, ActionKind::Unknown);
        assert!(command.camera_name.is_none());
        assert!(command.place_name.is_none());
    }

    #[test]
    fn broken_json_with_unmatchable_transcript_is_unknown() {
        // The brace pair is present but the body does not parse; the keyword
        // retry also misses, so the result degrades to unknown.
        let command = interpret("{borked", "frobnicate the widget");
        assert_eq!(command.action, ActionKind::Unknown);

        let command = interpret("{not: valid}", "frobnicate the widget");
        assert_eq!(command.action, ActionKind::Unknown);
    }

    #[test]
    fn explicit_unknown_action_is_a_miss() {
        let command = interpret(r#"{"action": "unknown"}"#, "");
        assert_eq!(command.action, ActionKind::Unknown);
    }

    #[test]
    fn unrecognized_action_strings_collapse_to_unknown() {
        let command = interpret(r#"{"action": "reboot_server"}"#, "");
        assert_eq!(command.action, ActionKind::Unknown);
    }

    #[test]
    fn model_fields_map_one_to_one() {
        let raw = r#"{
            "action": "analyze_camera",
            "camera_id": "cam-7",
            "camera_name": "Dock Cam",
            "place_name": null,
            "object": "forklift",
            "intent": "safety check"
        }"#;
        let command = interpret(raw, "");

        assert_eq!(command.action, ActionKind::AnalyzeCamera);
        assert_eq!(command.camera_id.as_deref(), Some("cam-7"));
        assert_eq!(command.camera_name.as_deref(), Some("Dock Cam"));
        assert!(command.place_name.is_none());
        assert_eq!(command.object.as_deref(), Some("forklift"));
        assert_eq!(command.intent.as_deref(), Some("safety check"));
    }
}
