use super::*;
use crate::crew::{Crew, HeuristicBackend};
use crate::screenplay::{parse_screenplay, Screenplay};
use crate::vignette::{Segment, SegmentKind, Vignette};
use std::collections::BTreeMap;

const SCRIPT: &str = "\
INT. OFFICE - NIGHT

DANA sits at her desk, nervous, staring at the phone.

DANA
Pick up.

EXT. FARMHOUSE - DAY - FLASHBACK

Years ago. Rain falls on the porch. A young DANA runs to the car.
";

fn notes_for(screenplay: &Screenplay, scene: usize, shot: usize) -> ShotNotes {
    let scene = &screenplay.scenes[scene];
    Crew::new(&HeuristicBackend).consult_shot(scene, &scene.shots[shot])
}

fn registry() -> CharacterRegistry {
    let dana = CharacterProfile {
        age: "30s".to_string(),
        gender: "female".to_string(),
        wardrobe_style: "grey cardigan".to_string(),
        emotional_arc: BTreeMap::from([("1".to_string(), "on edge".to_string())]),
        ..CharacterProfile::default()
    };
    CharacterRegistry::new(
        BTreeMap::from([("Dana".to_string(), dana)]),
        BTreeMap::from([("DEE".to_string(), "Dana".to_string())]),
    )
    .unwrap()
}

#[test]
fn tagged_prompt_marks_flashback_shots() {
    let screenplay = parse_screenplay(SCRIPT);
    let scene = &screenplay.scenes[1];
    let prompt = shot_prompt(scene, &scene.shots[0]);
    assert_eq!(prompt.shot_id, "2-001");
    assert!(prompt
        .veo3_prompt
        .starts_with("[CAMERA] WIDE ESTABLISHING, slow push in or crane | [SUBJECT] Years ago."));
    assert!(prompt.veo3_prompt.ends_with(
        "| [ENVIRONMENT] FARMHOUSE, DAY | [EFFECT] Flashback treatment - desaturated, dreamy | [DURATION] 5-8 seconds"
    ));
    assert_eq!(prompt.metadata.scene, 2);
    assert_eq!(prompt.metadata.shot_type, "WIDE ESTABLISHING");

    let json = serde_json::to_value(&prompt).unwrap();
    assert_eq!(json["metadata"]["type"], "WIDE ESTABLISHING");
}

#[test]
fn natural_prompt_for_an_empty_establishing_shot() {
    let screenplay = parse_screenplay(SCRIPT);
    let notes = notes_for(&screenplay, 0, 0);
    let scene = &screenplay.scenes[0];
    let source = PromptSource::new(scene, &scene.shots[0], &notes);
    let prompt = natural_prompt(&source);

    assert_eq!(prompt.subject, "An establishing view of A mysterious Office.");
    assert_eq!(
        prompt.context,
        "The Office is an interior space with a desk, computer equipment, and professional \
         furnishings. Practical lights provide warm illumination."
    );
    assert!(prompt.camera_motion.starts_with("A slow, majestic crane shot"));
    assert!(prompt
        .camera_motion
        .ends_with("The movement unfolds leisurely, allowing viewers to absorb details."));
    assert_eq!(
        prompt.texture,
        "Smooth painted walls, polished wood surfaces, soft fabric upholstery, diffused light \
         creating gentle gradients, dust motes visible in light beams."
    );
    assert!(prompt.style.starts_with("Thriller-style cinematography"));
    assert!(prompt.style.contains("warm color grading"));

    let text = prompt.to_text();
    assert!(text.starts_with("Subject: "));
    assert_eq!(text.lines().count(), 9);
}

#[test]
fn late_night_reads_as_intimate_not_mysterious() {
    let screenplay = parse_screenplay("INT. DINER - LATE NIGHT\n\nThe empty diner hums.\n");
    let notes = notes_for(&screenplay, 0, 0);
    let scene = &screenplay.scenes[0];
    let prompt = natural_prompt(&PromptSource::new(scene, &scene.shots[0], &notes));
    assert_eq!(prompt.subject, "An establishing view of A intimate Diner.");
}

#[test]
fn enhanced_prompt_uses_profiles_and_dialogue() {
    let screenplay = parse_screenplay(SCRIPT);
    let scene = &screenplay.scenes[0];
    let dialogue_idx = scene
        .shots
        .iter()
        .position(|shot| !shot.dialogue.is_empty())
        .unwrap();
    let notes = notes_for(&screenplay, 0, dialogue_idx);
    let source = PromptSource::new(scene, &scene.shots[dialogue_idx], &notes);
    let prompt = enhanced_prompt(&source, &registry());

    assert_eq!(prompt.subject, "Focus on Dana in Office during NIGHT.");
    assert_eq!(
        prompt.characters,
        "Dana, 30s, female, (on edge), wearing grey cardigan"
    );
    assert_eq!(prompt.dialogue_and_vo, "Dialogue: \"Pick up....\"");
    assert!(prompt.action.contains("Dana displays anxious"));
    assert!(!prompt.action.contains("static"));
    assert!(prompt.texture.contains("Dana's grey cardigan"));
    assert_eq!(
        prompt.camera_motion,
        "Camera employs subtle drift to enhance visual storytelling."
    );
}

#[test]
fn enhanced_prompt_without_cast_or_speech() {
    let screenplay = parse_screenplay(SCRIPT);
    let scene = &screenplay.scenes[1];
    let notes = notes_for(&screenplay, 1, 0);
    let source = PromptSource::new(scene, &scene.shots[0], &notes);
    let prompt = enhanced_prompt(&source, &CharacterRegistry::default());

    assert!(prompt.characters.is_empty());
    assert_eq!(prompt.dialogue_and_vo, "No dialogue in this shot.");
    assert!(prompt.context.contains("(FLASHBACK SEQUENCE)"));
    assert!(prompt.environment.contains("(memory sequence)"));
    assert!(!prompt.to_text().contains("Characters:"));
}

#[test]
fn aliases_resolve_to_profiles_case_insensitively() {
    let registry = registry();
    assert_eq!(registry.canonical("dee"), "Dana");
    assert_eq!(registry.canonical("DANA"), "Dana");
    assert_eq!(registry.describe("MARCUS", 1), "MARCUS");
    assert_eq!(
        registry.describe("Dee", 2),
        "Dana, 30s, female, wearing grey cardigan"
    );

    let err = CharacterRegistry::new(
        BTreeMap::new(),
        BTreeMap::from([("DOC".to_string(), "Dr. Roy".to_string())]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown profile"));
}

#[test]
fn segment_prompt_picks_shot_type_from_content() {
    let mut segment = Segment::new(3, 2, SegmentKind::Video);
    segment.content = "Close on the watch face as it lights up.".to_string();
    segment.characters_mentioned = vec!["Priya".to_string()];
    segment.time_period = "2035".to_string();
    segment.on_screen_text = "Time to move".to_string();
    let vignette = Vignette {
        scene_number: 3,
        scene_title: "Morning".to_string(),
        segments: vec![segment.clone()],
        total_video_segments: 1,
        total_vo_segments: 0,
        characters: vec!["Priya".to_string()],
        locations: Vec::new(),
        transitions: Vec::new(),
    };
    let prompt = segment_prompt(&vignette, &segment);
    assert_eq!(prompt.segment_id, "3-002");
    assert_eq!(
        prompt.veo3_prompt,
        "[SHOT TYPE] CLOSE-UP | [VISUAL] Close on the watch face as it lights up. | \
         [CHARACTERS] Priya | [TIME] 2035 | [TEXT OVERLAY] Time to move"
    );
    assert_eq!(prompt.vignette, 3);
}

#[test]
fn master_files_concatenate_in_order() {
    let entries = vec![
        ("a_scene1_shot001".to_string(), "Subject: one".to_string()),
        ("a_scene1_shot002".to_string(), "Subject: two".to_string()),
    ];
    let rule = "=".repeat(60);
    assert_eq!(
        natural_master_file(&entries),
        format!("=== a_scene1_shot001 ===\n\nSubject: one\n\n{rule}\n=== a_scene1_shot002 ===\n\nSubject: two\n")
    );
    let enhanced = enhanced_master_file(&entries);
    assert!(enhanced.starts_with("ENHANCED VEO3 PROMPTS WITH CHARACTER CONSISTENCY & VOICE-OVERS\n"));
    assert!(enhanced.contains(&format!("\n{rule}\na_scene1_shot002\n{rule}\n\nSubject: two\n")));
}
