use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Narrative mode of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SceneType {
    #[default]
    Present,
    Flashback,
    Dream,
    Montage,
}

impl SceneType {
    pub fn as_str(self) -> &'static str {
        match self {
            SceneType::Present => "PRESENT",
            SceneType::Flashback => "FLASHBACK",
            SceneType::Dream => "DREAM",
            SceneType::Montage => "MONTAGE",
        }
    }
}

impl fmt::Display for SceneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceTiming {
    /// Spoken over the scene it appears in.
    DuringScene,
    /// Bridges scenes; gets its own montage coverage.
    Transitional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceKind {
    VoiceOver,
    OffScreen,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceOver {
    pub character: String,
    pub text: String,
    pub scene_context: String,
    pub timing: VoiceTiming,
    #[serde(rename = "type")]
    pub kind: VoiceKind,
    pub emotional_tone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    #[serde(rename = "type")]
    pub kind: String,
    pub from_scene: String,
    pub to_scene: String,
}

/// How a shot came to exist during coverage planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotKind {
    Establishing,
    Action,
    Dialogue,
    Montage,
    Closing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shot {
    pub shot_id: String,
    pub scene_number: u32,
    pub shot_number: u32,
    pub shot_type: String,
    pub description: String,
    pub duration: String,
    pub camera_movement: String,
    pub characters_in_frame: Vec<String>,
    pub dialogue: Vec<String>,
    pub voice_overs: Vec<VoiceOver>,
    pub is_flashback: bool,
    pub is_montage: bool,
    pub visual_effects: String,
    #[serde(skip)]
    pub kind: ShotKind,
}

impl Shot {
    /// Zero-padded shot number used in ids and file names.
    pub fn padded_number(&self) -> String {
        format!("{:03}", self.shot_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogueBlock {
    pub character: String,
    pub lines: Vec<String>,
}

impl DialogueBlock {
    /// Speaker name without extensions such as `(CONT'D)` or `(O.S.)`.
    pub fn speaker(&self) -> &str {
        speaker_name(&self.character)
    }
}

pub fn speaker_name(cue: &str) -> &str {
    cue.split('(').next().unwrap_or(cue).trim()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub scene_number: u32,
    pub heading: String,
    pub location: String,
    pub time_of_day: String,
    pub scene_type: SceneType,
    pub description: String,
    pub action_blocks: Vec<String>,
    pub dialogue_blocks: Vec<DialogueBlock>,
    pub voice_overs: Vec<VoiceOver>,
    pub shots: Vec<Shot>,
    #[serde(rename = "transitions_in")]
    pub transition_in: Option<Transition>,
    #[serde(rename = "transitions_out")]
    pub transition_out: Option<Transition>,
    /// Raw scene text, heading included.
    #[serde(skip)]
    pub text: String,
}

impl Scene {
    pub fn is_interior(&self) -> bool {
        let upper = self.heading.to_uppercase();
        upper.starts_with("INT") || upper.starts_with("I/E")
    }

    /// Distinct speakers in order of first appearance.
    pub fn speakers(&self) -> Vec<String> {
        let mut names = Vec::new();
        for block in &self.dialogue_blocks {
            crate::util::push_unique(&mut names, block.speaker());
        }
        names
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScriptStats {
    pub total_scenes: usize,
    pub total_shots: usize,
    pub total_voice_overs: usize,
    pub scene_types: BTreeMap<String, usize>,
    pub shot_types: BTreeMap<String, usize>,
    pub transitions: BTreeMap<String, usize>,
    pub flashback_scenes: usize,
    pub montage_scenes: usize,
    pub dialogue_shots: usize,
    pub action_shots: usize,
    pub off_screen_lines: usize,
}

impl ScriptStats {
    pub fn shot_type_count(&self, shot_type: &str) -> usize {
        self.shot_types.get(shot_type).copied().unwrap_or(0)
    }
}

/// A voice line found anywhere in the script by its cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceLine {
    pub character: String,
    pub text: String,
    /// Byte offset of the cue line.
    pub position: usize,
    pub kind: VoiceKind,
}

/// A fully analysed traditional screenplay.
#[derive(Debug, Clone, PartialEq)]
pub struct Screenplay {
    pub scenes: Vec<Scene>,
    pub voice_lines: Vec<VoiceLine>,
    pub stats: ScriptStats,
}

impl Screenplay {
    pub fn shots(&self) -> impl Iterator<Item = (&Scene, &Shot)> {
        self.scenes
            .iter()
            .flat_map(|scene| scene.shots.iter().map(move |shot| (scene, shot)))
    }
}
