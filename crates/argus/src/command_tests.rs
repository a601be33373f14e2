//! Unit tests for the keyword classifier

#[cfg(test)]
mod tests {
    use crate::command::{keyword_match, ActionKind, KEYWORD_RULES};

    #[test]
    fn add_camera_matches_regardless_of_token_order() {
        for transcript in [
            "add camera gate",
            "camera add gate",
            "please add a new camera at the gate",
            "ADD CAMERA gate",
        ] {
            let command = keyword_match(transcript).expect("rule should match");
            assert_eq!(
                command.action,
                ActionKind::AddCamera,
                "transcript: {transcript:?}"
            );
        }
    }

    #[test]
    fn specific_rules_preempt_generic_show() {
        let command = keyword_match("show camera at the gate").expect("rule should match");
        assert_eq!(command.action, ActionKind::ShowCamera);
        // The (show, camera) rule carries the entity into both camera fields;
        // the bare "show" catch-all would have done the same, but via the
        // wrong rule — the keyword set proves which one fired.
        assert_eq!(command.camera_name.as_deref(), Some("gate"));
        assert_eq!(command.camera_id.as_deref(), Some("gate"));
    }

    #[test]
    fn generic_catch_alls_stay_last() {
        // Rule order is load-bearing: the bare "open"/"show" rules must
        // remain at the very end or they swallow the specific commands.
        let n = KEYWORD_RULES.len();
        assert_eq!(KEYWORD_RULES[n - 2], (&["open"][..], ActionKind::ShowCamera));
        assert_eq!(KEYWORD_RULES[n - 1], (&["show"][..], ActionKind::ShowCamera));

        for (keywords, _) in &KEYWORD_RULES[..n - 2] {
            assert!(
                keywords.len() > 1 || !["open", "show"].contains(&keywords[0]),
                "single-keyword open/show rule found before the catch-alls"
            );
        }
    }

    #[test]
    fn multi_word_entity_name_survives_extraction() {
        let command =
            keyword_match("open sri lakshmi narayan temple camera").expect("rule should match");
        assert_eq!(command.action, ActionKind::ShowCamera);
        assert_eq!(
            command.camera_name.as_deref(),
            Some("sri lakshmi narayan temple")
        );
    }

    #[test]
    fn trailing_punctuation_and_case_are_normalized() {
        let command = keyword_match("Show Camera At The Gate!").expect("rule should match");
        assert_eq!(command.action, ActionKind::ShowCamera);
        assert_eq!(command.camera_name.as_deref(), Some("gate"));

        let command = keyword_match("any motion?").expect("rule should match");
        assert_eq!(command.action, ActionKind::DetectMotion);
    }

    #[test]
    fn broad_extraction_wins_when_rule_keywords_are_not_stop_words() {
        // "cameras" is a rule keyword but not a stop word, so the broad
        // removal keeps it and ends up longer than the narrow one; the
        // longer (broad) phrase is what the source behavior retains.
        let command = keyword_match("show cameras in parking lot").expect("rule should match");
        assert_eq!(command.action, ActionKind::ShowPlace);
        assert_eq!(command.place_name.as_deref(), Some("cameras parking lot"));
    }

    #[test]
    fn place_rules_set_place_name_only() {
        let command = keyword_match("add a new place parking lot").expect("rule should match");
        assert_eq!(command.action, ActionKind::AddPlace);
        assert_eq!(command.place_name.as_deref(), Some("parking lot"));
        assert!(command.camera_name.is_none());
        assert!(command.camera_id.is_none());
    }

    #[test]
    fn vision_rules_set_camera_name() {
        let command = keyword_match("detect person on gate cam").expect("rule should match");
        assert_eq!(command.action, ActionKind::DetectPerson);
        assert_eq!(command.camera_name.as_deref(), Some("gate cam"));

        let command = keyword_match("what's happening").expect("rule should match");
        assert_eq!(command.action, ActionKind::AnalyzeCamera);
        assert!(command.camera_name.is_none());
    }

    #[test]
    fn unmatched_transcript_returns_none() {
        assert!(keyword_match("good morning everyone").is_none());
        assert!(keyword_match("").is_none());
    }
}
