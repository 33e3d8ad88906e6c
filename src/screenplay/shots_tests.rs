use super::{characters_in_action, estimate_duration, generate_shots, SceneDraft};
use crate::screenplay::model::{DialogueBlock, SceneType, ShotKind};

fn block(character: &str, line: &str) -> DialogueBlock {
    DialogueBlock {
        character: character.to_string(),
        lines: vec![line.to_string()],
    }
}

fn draft<'a>(
    text: &'a str,
    action_blocks: &'a [String],
    dialogue_blocks: &'a [DialogueBlock],
) -> SceneDraft<'a> {
    SceneDraft {
        number: 1,
        location: "HARBOR",
        text,
        scene_type: SceneType::Present,
        action_blocks,
        dialogue_blocks,
        voice_overs: &[],
    }
}

#[test]
fn dialogue_shots_hold_two_speakers_before_cutting() {
    let actions = vec!["Gulls circle overhead.".to_string()];
    let dialogue = vec![
        block("ANA", "We're late."),
        block("BEN (CONT'D)", "We're always late."),
        block("CY", "Then run."),
        block("ANA", "Fine."),
    ];
    let shots = generate_shots(&draft("INT. HARBOR - DAY\n", &actions, &dialogue));

    let types: Vec<&str> = shots.iter().map(|shot| shot.shot_type.as_str()).collect();
    assert_eq!(types, vec!["WIDE ESTABLISHING", "MEDIUM", "OVER-THE-SHOULDER"]);
    let ids: Vec<&str> = shots.iter().map(|shot| shot.shot_id.as_str()).collect();
    assert_eq!(ids, vec!["1-001", "1-002", "1-003"]);

    assert_eq!(shots[1].characters_in_frame, vec!["ANA", "BEN"]);
    assert_eq!(shots[1].dialogue, vec!["We're late.", "We're always late."]);
    assert_eq!(shots[1].description, "Dialogue: ANA");
    assert_eq!(shots[2].characters_in_frame, vec!["CY", "ANA"]);
    assert_eq!(shots[2].camera_movement, "subtle drift");
}

#[test]
fn a_lone_speaker_gets_a_new_shot_after_three_lines() {
    let dialogue = vec![
        block("ANA", "One."),
        block("ANA", "Two."),
        block("ANA", "Three."),
        block("ANA", "Four."),
    ];
    let shots = generate_shots(&draft("INT. HARBOR - CONTINUOUS\n", &[], &dialogue));
    assert_eq!(shots.len(), 2);
    assert_eq!(shots[0].dialogue.len(), 3);
    assert_eq!(shots[1].dialogue, vec!["Four."]);
}

#[test]
fn busy_scenes_get_a_closing_wide_shot() {
    let actions = vec![
        "Wide on the harbor.".to_string(),
        "Close-up on the rope.".to_string(),
        "The boat drifts, camera tracking.".to_string(),
    ];
    let shots = generate_shots(&draft("INT. HARBOR - DAY\n\nThe end.\n", &actions, &[]));
    assert_eq!(shots.len(), 5);

    assert_eq!(shots[1].shot_type, "WIDE");
    assert_eq!(shots[1].duration, "5-8 seconds");
    assert_eq!(shots[2].shot_type, "CLOSE-UP");
    assert_eq!(shots[2].duration, "2-3 seconds");
    assert_eq!(shots[3].shot_type, "MEDIUM");
    assert_eq!(shots[3].camera_movement, "dolly");

    let closing = &shots[4];
    assert_eq!(closing.kind, ShotKind::Closing);
    assert_eq!(closing.shot_id, "1-005");
    assert_eq!(closing.description, "Scene closing - HARBOR");
    assert_eq!(closing.camera_movement, "pull back or static");
}

#[test]
fn scenes_ending_on_a_cut_skip_the_closing_shot() {
    let actions = vec![
        "Wide on the harbor.".to_string(),
        "Close-up on the rope.".to_string(),
        "The boat drifts, camera tracking.".to_string(),
    ];
    let shots = generate_shots(&draft("INT. HARBOR - DAY\n\nCUT TO:\n", &actions, &[]));
    assert_eq!(shots.len(), 4);
    assert_ne!(shots[3].kind, ShotKind::Closing);
}

#[test]
fn flashback_scenes_flag_their_shots() {
    let actions = vec!["Gulls circle overhead.".to_string()];
    let mut scene = draft("INT. HARBOR - DAY\n", &actions, &[]);
    scene.scene_type = SceneType::Flashback;
    let shots = generate_shots(&scene);
    assert!(shots[0].is_flashback);
    assert!(!shots[0].visual_effects.is_empty());
}

#[test]
fn names_in_action_are_shouted_words() {
    assert_eq!(
        characters_in_action("JOHN and MARY walk INTO THE room. JOHN waves."),
        vec!["JOHN", "MARY"]
    );
    assert!(characters_in_action("He said OK.").is_empty());
}

#[test]
fn duration_scales_with_word_count() {
    let long = "word ".repeat(60);
    assert_eq!(estimate_duration(&long, None), "5-7 seconds");
    assert_eq!(estimate_duration(&"word ".repeat(25), None), "3-5 seconds");
    assert_eq!(estimate_duration("Short beat.", Some("WIDE")), "5-8 seconds");
}
