//! Offline crew: department notes derived from the parsed script alone.
use super::context::ShotContext;
use super::plans::{
    BreakdownNote, CameraPlan, CharacterNote, CharacterPlan, EnvironmentPlan, LightingPlan,
    MusicCue, SoundPlan, SynthesisNote, TechnicalSummary,
};
use super::{CrewBackend, Department};
use crate::screenplay::{SceneType, ShotKind};
use crate::summary::emotional_tone;
use crate::util::{capitalize, title_case};
use anyhow::{Context, Result};
use serde_json::Value;

const PROP_KEYWORDS: [&str; 22] = [
    "desk", "computer", "laptop", "phone", "coffee", "cup", "table", "chair", "window", "door",
    "car", "glass", "bottle", "book", "photo", "plant", "flowers", "lamp", "bed", "watch",
    "tablet", "metal",
];
const MAX_PROPS: usize = 6;
const CONDITIONS: [&str; 3] = ["rain", "fog", "snow"];

/// Rule-based stand-in for the LM crew.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicBackend;

impl CrewBackend for HeuristicBackend {
    fn label(&self) -> &'static str {
        "heuristic"
    }

    fn consult(&self, department: Department, context: &ShotContext<'_>) -> Result<Value> {
        let value = match department {
            Department::ScriptBreakdown => serde_json::to_value(breakdown(context)),
            Department::CharacterAnalysis => serde_json::to_value(characters(context)),
            Department::EnvironmentProps => serde_json::to_value(environment(context)),
            Department::CameraDirector => serde_json::to_value(camera(context)),
            Department::LightingDesigner => serde_json::to_value(lighting(context)),
            Department::SoundDesigner => serde_json::to_value(sound(context)),
            Department::MusicDirector => serde_json::to_value(music(context)),
            Department::PromptSynthesis => serde_json::to_value(synthesis(context)),
        };
        value.with_context(|| format!("serialize {department} notes"))
    }
}

fn breakdown(context: &ShotContext<'_>) -> BreakdownNote {
    let kind = context.shot.kind;
    let dramatic_purpose = match kind {
        ShotKind::Establishing => "Establish character state and environment",
        ShotKind::Action => "Advance the physical action of the scene",
        ShotKind::Dialogue => "Carry the exchange between characters",
        ShotKind::Montage => "Bridge time and place under the voice-over",
        ShotKind::Closing => "Let the scene settle before the transition",
    };
    BreakdownNote {
        dramatic_purpose: dramatic_purpose.to_string(),
        necessity: if kind == ShotKind::Closing {
            "supporting"
        } else {
            "essential"
        }
        .to_string(),
        tone: emotional_tone(context.scene.text).to_string(),
    }
}

fn characters(context: &ShotContext<'_>) -> CharacterPlan {
    let shot = context.shot;
    let mut names = shot.characters_in_frame.clone();
    if names.is_empty() && matches!(shot.kind, ShotKind::Action | ShotKind::Dialogue) {
        names = context.scene.speakers.iter().take(2).cloned().collect();
    }
    let emotional_state = match emotional_tone(context.scene.text) {
        "tense" => "anxious",
        "dramatic" => "shaken",
        "romantic" => "tender",
        "action" => "urgent",
        "contemplative" => "reflective",
        "melancholic" => "sorrowful",
        "hopeful" => "hopeful",
        _ => "focused",
    };
    let movement = match shot.kind {
        ShotKind::Action => "moves through the space",
        ShotKind::Dialogue => "static",
        ShotKind::Establishing | ShotKind::Montage | ShotKind::Closing => "",
    };
    CharacterPlan {
        characters: names
            .into_iter()
            .map(|name| CharacterNote {
                name,
                emotional_state: emotional_state.to_string(),
                wardrobe: String::new(),
                movement: movement.to_string(),
            })
            .collect(),
    }
}

fn environment(context: &ShotContext<'_>) -> EnvironmentPlan {
    let scene = &context.scene;
    let lower = scene.text.to_lowercase();
    let props = PROP_KEYWORDS
        .iter()
        .filter(|prop| lower.contains(*prop))
        .take(MAX_PROPS)
        .map(|prop| prop.to_string())
        .collect();
    let conditions = CONDITIONS
        .iter()
        .find(|condition| lower.contains(*condition))
        .copied()
        .unwrap_or("normal");
    let weather = if conditions != "normal" {
        capitalize(conditions)
    } else if scene.time_of_day.to_uppercase().contains("DAY") {
        "Clear".to_string()
    } else {
        "Overcast".to_string()
    };
    EnvironmentPlan {
        location: title_case(scene.location),
        time_of_day: scene.time_of_day.to_string(),
        props,
        setting_description: String::new(),
        environmental_conditions: conditions.to_string(),
        weather,
        atmosphere: "Lived-in, authentic".to_string(),
    }
}

fn camera(context: &ShotContext<'_>) -> CameraPlan {
    let shot = context.shot;
    let size = shot.shot_type.to_uppercase();
    let close = size.contains("CLOSE");
    let wide = size.contains("WIDE");
    let framing = if wide {
        "wide framing that holds the full geography"
    } else if close {
        "tight framing on the face"
    } else if size.contains("OVER-THE-SHOULDER") {
        "over-the-shoulder framing favouring the speaker"
    } else {
        "balanced medium framing"
    };
    CameraPlan {
        shot_type: shot.shot_type.clone(),
        camera_movement: shot.camera_movement.clone(),
        angle: if size.contains("ESTABLISHING") {
            "Eye level"
        } else {
            "Slight low angle"
        }
        .to_string(),
        lens: if wide { "24mm" } else { "50mm" }.to_string(),
        framing: framing.to_string(),
        composition: if close { "center" } else { "rule of thirds" }.to_string(),
        depth_of_field: if close {
            "shallow"
        } else if wide {
            "deep"
        } else {
            "medium"
        }
        .to_string(),
    }
}

fn lighting(context: &ShotContext<'_>) -> LightingPlan {
    let scene = &context.scene;
    let time = scene.time_of_day.to_uppercase();
    let night = time.contains("NIGHT");
    let (sources, key_light, color_temperature, intensity) = match (scene.interior, night) {
        (true, false) => (
            vec!["Window light (natural)", "Overhead practical fixtures"],
            "Window light - soft, directional",
            "5600K daylight mixed with 3200K practicals",
            "soft",
        ),
        (true, true) => (
            vec!["Practical lamps", "Moonlight through windows"],
            "Practical lamp - warm, low",
            "3200K tungsten practicals",
            "soft",
        ),
        (false, false) => (
            vec!["Natural sunlight", "Bounce from surroundings"],
            "Sun as key - motivated, directional",
            "5600K daylight",
            if time.contains("DAY") {
                "harsh"
            } else {
                "balanced"
            },
        ),
        (false, true) => (
            vec!["Street practicals", "Moonlight"],
            "Streetlight - cool, hard",
            "6500K moonlight with sodium practicals",
            "balanced",
        ),
    };
    let mood = match emotional_tone(scene.text) {
        "neutral" => "naturalistic",
        "action" => "dramatic",
        tone => tone,
    };
    let atmosphere = match scene.scene_type {
        SceneType::Flashback => "hazy and nostalgic",
        SceneType::Dream => "ethereal",
        SceneType::Montage => "energetic",
        SceneType::Present => "grounded and intimate",
    };
    LightingPlan {
        sources: sources.into_iter().map(str::to_string).collect(),
        mood: mood.to_string(),
        atmosphere: atmosphere.to_string(),
        color_temperature: color_temperature.to_string(),
        intensity: intensity.to_string(),
        key_light: key_light.to_string(),
        fill_ratio: "2:1 for gentle contrast".to_string(),
    }
}

fn sound(context: &ShotContext<'_>) -> SoundPlan {
    let strings = |items: &[&str]| items.iter().map(|item| item.to_string()).collect();
    let on_screen: &[&str] = if context.shot.dialogue.is_empty() {
        &["Footsteps", "Breathing", "Clothing rustle"]
    } else {
        &["Dialogue", "Breathing", "Clothing rustle"]
    };
    let ambience: &[&str] = if context.scene.interior {
        &["Room tone", "HVAC hum"]
    } else {
        &["Exterior ambience", "Light wind"]
    };
    SoundPlan {
        on_screen: strings(on_screen),
        off_screen: strings(&["Traffic", "Distant conversations"]),
        ambience: strings(ambience),
        spot_effects: strings(&["Door close", "Chair scrape"]),
        perspective: "Objective transitioning to subjective".to_string(),
    }
}

fn music(context: &ShotContext<'_>) -> MusicCue {
    let (presence, reasoning) = match context.scene.scene_type {
        SceneType::Present => ("silence", "Let environment and tension speak"),
        SceneType::Flashback => ("underscore", "A gentle theme carries the memory"),
        SceneType::Dream => ("underscore", "Ethereal textures support the dream logic"),
        SceneType::Montage => ("featured", "Music drives the montage rhythm"),
    };
    MusicCue {
        presence: presence.to_string(),
        reasoning: reasoning.to_string(),
    }
}

fn synthesis(context: &ShotContext<'_>) -> SynthesisNote {
    let shot = context.shot;
    let verdict = context
        .prior_str(Department::ScriptBreakdown, "necessity")
        .unwrap_or("essential");
    let camera = match context.prior_str(Department::CameraDirector, "lens") {
        Some(lens) => format!("{}, {lens}", shot.shot_type),
        None => shot.shot_type.clone(),
    };
    let audio = if shot.voice_overs.is_empty() {
        "Diegetic focus"
    } else {
        "Voice-over over a diegetic bed"
    };
    SynthesisNote {
        necessity_verdict: verdict.to_string(),
        technical_summary: TechnicalSummary {
            camera,
            lighting: "Natural/motivated".to_string(),
            audio: audio.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "heuristic_tests.rs"]
mod tests;
