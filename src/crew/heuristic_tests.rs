use super::*;
use crate::crew::plans::{CameraPlan, CharacterPlan, EnvironmentPlan, LightingPlan, MusicCue};
use crate::screenplay::{parse_screenplay, Screenplay};

const SCRIPT: &str = "\
INT. OFFICE - NIGHT

DANA sits at her desk, nervous, staring at the phone.

DANA
Pick up.

EXT. FARMHOUSE - DAY - FLASHBACK

Years ago. Rain falls on the porch. A young DANA runs to the car.
";

fn notes<T: serde::de::DeserializeOwned>(
    screenplay: &Screenplay,
    scene: usize,
    shot: usize,
    department: Department,
) -> T {
    let scene = &screenplay.scenes[scene];
    let context = ShotContext::new(scene, &scene.shots[shot]);
    let value = HeuristicBackend.consult(department, &context).unwrap();
    serde_json::from_value(value).unwrap()
}

#[test]
fn camera_follows_shot_size() {
    let screenplay = parse_screenplay(SCRIPT);
    let establishing: CameraPlan = notes(&screenplay, 0, 0, Department::CameraDirector);
    assert_eq!(establishing.angle, "Eye level");
    assert_eq!(establishing.lens, "24mm");
    assert_eq!(establishing.depth_of_field, "deep");

    let dialogue_idx = screenplay.scenes[0]
        .shots
        .iter()
        .position(|shot| shot.kind == ShotKind::Dialogue)
        .unwrap();
    let dialogue: CameraPlan = notes(&screenplay, 0, dialogue_idx, Department::CameraDirector);
    assert_eq!(dialogue.angle, "Slight low angle");
    assert_eq!(dialogue.lens, "50mm");
}

#[test]
fn night_interior_lighting_is_warm_and_soft() {
    let screenplay = parse_screenplay(SCRIPT);
    let lighting: LightingPlan = notes(&screenplay, 0, 0, Department::LightingDesigner);
    assert_eq!(lighting.color_temperature, "3200K tungsten practicals");
    assert_eq!(lighting.intensity, "soft");
    assert_eq!(lighting.mood, "tense");
}

#[test]
fn environment_picks_props_and_conditions_from_scene_text() {
    let screenplay = parse_screenplay(SCRIPT);
    let office: EnvironmentPlan = notes(&screenplay, 0, 0, Department::EnvironmentProps);
    assert_eq!(office.location, "Office");
    assert_eq!(office.props, vec!["desk", "phone"]);
    assert_eq!(office.environmental_conditions, "normal");
    assert_eq!(office.weather, "Overcast");

    let farm: EnvironmentPlan = notes(&screenplay, 1, 0, Department::EnvironmentProps);
    assert_eq!(farm.environmental_conditions, "rain");
    assert_eq!(farm.weather, "Rain");
}

#[test]
fn characters_come_from_the_frame() {
    let screenplay = parse_screenplay(SCRIPT);
    let scene = &screenplay.scenes[0];
    let dialogue_idx = scene
        .shots
        .iter()
        .position(|shot| shot.kind == ShotKind::Dialogue)
        .unwrap();
    let plan: CharacterPlan = notes(&screenplay, 0, dialogue_idx, Department::CharacterAnalysis);
    assert_eq!(plan.characters.len(), 1);
    assert_eq!(plan.characters[0].name, "DANA");
    assert_eq!(plan.characters[0].movement, "static");

    let establishing: CharacterPlan = notes(&screenplay, 0, 0, Department::CharacterAnalysis);
    assert!(establishing.characters.is_empty());
}

#[test]
fn flashback_scenes_get_an_underscore() {
    let screenplay = parse_screenplay(SCRIPT);
    assert_eq!(screenplay.scenes[1].scene_type, SceneType::Flashback);
    let cue: MusicCue = notes(&screenplay, 1, 0, Department::MusicDirector);
    assert_eq!(cue.presence, "underscore");
    let present: MusicCue = notes(&screenplay, 0, 0, Department::MusicDirector);
    assert_eq!(present.presence, "silence");
}
