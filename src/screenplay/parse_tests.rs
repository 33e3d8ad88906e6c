use super::{detect_scene_type, parse_screenplay};
use crate::screenplay::model::{SceneType, VoiceKind, VoiceTiming};

const COFFEE_SHOP: &str = "FADE IN:

INT. COFFEE SHOP - DAY

Rain streaks the windows. SARAH sits alone at a corner table, stirring cold coffee.

JOHN
(nervous)
Is this seat taken?

SARAH
It is now.

CUT TO:

EXT. CITY STREET - NIGHT - FLASHBACK

The camera pans across empty storefronts.

NARRATOR (V.O.)
She never forgot that night.
Not once.

FADE OUT.
";

#[test]
fn scenes_split_on_sluglines_with_body_parts() {
    let script = parse_screenplay(COFFEE_SHOP);
    assert_eq!(script.scenes.len(), 2);

    let first = &script.scenes[0];
    assert_eq!(first.scene_number, 1);
    assert_eq!(first.heading, "INT. COFFEE SHOP - DAY");
    assert_eq!(first.location, "COFFEE SHOP");
    assert_eq!(first.time_of_day, "DAY");
    assert_eq!(first.scene_type, SceneType::Present);
    assert_eq!(
        first.action_blocks,
        vec!["Rain streaks the windows. SARAH sits alone at a corner table, stirring cold coffee."]
    );
    assert_eq!(first.description, first.action_blocks[0]);
    assert_eq!(first.dialogue_blocks.len(), 2);
    assert_eq!(first.dialogue_blocks[0].character, "JOHN");
    assert_eq!(first.dialogue_blocks[0].lines, vec!["Is this seat taken?"]);
    assert_eq!(first.speakers(), vec!["JOHN", "SARAH"]);

    let second = &script.scenes[1];
    assert_eq!(second.heading, "EXT. CITY STREET - NIGHT - FLASHBACK");
    assert_eq!(second.scene_type, SceneType::Flashback);
    assert_eq!(second.voice_overs.len(), 1);
    let voice = &second.voice_overs[0];
    assert_eq!(voice.character, "NARRATOR");
    assert_eq!(voice.text, "She never forgot that night. Not once.");
    assert_eq!(voice.timing, VoiceTiming::DuringScene);
    assert_eq!(voice.scene_context, second.heading);
}

#[test]
fn transitions_link_neighbouring_scenes() {
    let script = parse_screenplay(COFFEE_SHOP);
    let first = &script.scenes[0];
    let opening = first.transition_in.as_ref().expect("fade in");
    assert_eq!(opening.kind, "FADE IN");
    assert_eq!(opening.from_scene, "OPENING");
    assert_eq!(opening.to_scene, "1");
    let cut = first.transition_out.as_ref().expect("cut to");
    assert_eq!(cut.kind, "CUT TO");
    assert_eq!((cut.from_scene.as_str(), cut.to_scene.as_str()), ("1", "2"));

    let second = &script.scenes[1];
    assert_eq!(
        second.transition_in.as_ref().map(|t| t.kind.as_str()),
        Some("CUT TO")
    );
    let fade = second.transition_out.as_ref().expect("fade out");
    assert_eq!(fade.kind, "FADE OUT");
    assert_eq!(fade.to_scene, "END");
}

#[test]
fn statistics_summarize_the_script() {
    let script = parse_screenplay(COFFEE_SHOP);
    let stats = &script.stats;
    assert_eq!(stats.total_scenes, 2);
    assert_eq!(stats.total_shots, 4);
    assert_eq!(stats.total_voice_overs, 1);
    assert_eq!(stats.flashback_scenes, 1);
    assert_eq!(stats.dialogue_shots, 1);
    assert_eq!(stats.action_shots, 3);
    assert_eq!(stats.transitions.get("CUT TO"), Some(&2));
    assert_eq!(stats.transitions.get("FADE IN"), Some(&1));
    assert_eq!(stats.transitions.get("FADE OUT"), Some(&1));
    assert_eq!(stats.shot_type_count("WIDE ESTABLISHING"), 2);
}

#[test]
fn narration_before_the_first_scene_becomes_montage_coverage() {
    let content = "NARRATOR (V.O.)\nEvery town has a secret.\n\nINT. DINER - NIGHT\n\nA neon sign flickers.\n";
    let script = parse_screenplay(content);
    let scene = &script.scenes[0];
    assert_eq!(scene.voice_overs.len(), 1);
    assert_eq!(scene.voice_overs[0].timing, VoiceTiming::Transitional);

    let montage = scene.shots.last().expect("montage shot");
    assert_eq!(montage.shot_type, "VARIOUS");
    assert_eq!(montage.description, "Voice-over montage: NARRATOR");
    assert!(montage.is_montage);
    assert_eq!(montage.voice_overs[0].text, "Every town has a secret.");
}

#[test]
fn text_without_sluglines_is_one_placeholder_scene() {
    let script = parse_screenplay("Just some prose without sluglines.\n");
    assert_eq!(script.scenes.len(), 1);
    let scene = &script.scenes[0];
    assert_eq!(scene.heading, "INT. LOCATION - DAY");
    assert_eq!(scene.location, "LOCATION");
    assert_eq!(scene.action_blocks, vec!["Just some prose without sluglines."]);
    assert_eq!(scene.shots[0].description, "Just some prose without sluglines.");
}

#[test]
fn off_screen_cues_stay_dialogue_and_are_counted() {
    let script = parse_screenplay("INT. HALLWAY - DAY\n\nMOM (O.S.)\nDinner is ready!\n");
    let scene = &script.scenes[0];
    assert_eq!(scene.dialogue_blocks[0].character, "MOM (O.S.)");
    assert_eq!(scene.dialogue_blocks[0].speaker(), "MOM");
    assert_eq!(script.stats.off_screen_lines, 1);
    assert_eq!(script.voice_lines[0].kind, VoiceKind::OffScreen);
}

#[test]
fn continuation_scenes_skip_the_establishing_shot() {
    let script = parse_screenplay("INT. DINER - NIGHT - CONTINUOUS\n\nA neon sign flickers.\n");
    assert!(script.scenes[0].shots.is_empty());
}

#[test]
fn scene_type_keywords_take_priority_over_the_heading() {
    assert_eq!(
        detect_scene_type("She wakes from the nightmare.", SceneType::Present),
        SceneType::Dream
    );
    assert_eq!(
        detect_scene_type("A SERIES OF SHOTS: training.", SceneType::Present),
        SceneType::Montage
    );
    assert_eq!(
        detect_scene_type("Quiet room.", SceneType::Flashback),
        SceneType::Flashback
    );
}

#[test]
fn double_dash_and_em_dash_sluglines_parse_cleanly() {
    for slugline in ["INT. KITCHEN -- NIGHT", "INT. KITCHEN \u{2014} NIGHT"] {
        let script = parse_screenplay(&format!("{slugline}\n\nMARA pours tea.\n"));
        let scene = &script.scenes[0];
        assert_eq!(scene.heading, "INT. KITCHEN - NIGHT", "{slugline}");
        assert_eq!(scene.location, "KITCHEN", "{slugline}");
        assert_eq!(scene.time_of_day, "NIGHT", "{slugline}");
    }

    let script = parse_screenplay("EXT. DOCKS -- DAWN -- FLASHBACK\n\nGulls circle.\n");
    assert_eq!(script.scenes[0].heading, "EXT. DOCKS - DAWN - FLASHBACK");
    assert_eq!(script.scenes[0].time_of_day, "DAWN");
}
