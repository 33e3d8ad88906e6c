//! Typed department notes.
//!
//! Every field defaults so a sparse LM reply still decodes; missing fields
//! simply drop out of the prompts built from them.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakdownNote {
    pub dramatic_purpose: String,
    pub necessity: String,
    pub tone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterNote {
    pub name: String,
    pub emotional_state: String,
    pub wardrobe: String,
    pub movement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterPlan {
    pub characters: Vec<CharacterNote>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentPlan {
    pub location: String,
    pub time_of_day: String,
    pub props: Vec<String>,
    pub setting_description: String,
    pub environmental_conditions: String,
    pub weather: String,
    pub atmosphere: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPlan {
    pub shot_type: String,
    pub camera_movement: String,
    pub angle: String,
    pub lens: String,
    pub framing: String,
    pub composition: String,
    pub depth_of_field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingPlan {
    pub sources: Vec<String>,
    pub mood: String,
    pub atmosphere: String,
    pub color_temperature: String,
    pub intensity: String,
    pub key_light: String,
    pub fill_ratio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundPlan {
    pub on_screen: Vec<String>,
    pub off_screen: Vec<String>,
    pub ambience: Vec<String>,
    pub spot_effects: Vec<String>,
    pub perspective: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicCue {
    pub presence: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalSummary {
    pub camera: String,
    pub lighting: String,
    pub audio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisNote {
    pub necessity_verdict: String,
    pub technical_summary: TechnicalSummary,
}
