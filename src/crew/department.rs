use serde::Serialize;
use std::fmt;

/// One seat on the film crew. Declaration order is consultation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    ScriptBreakdown,
    CharacterAnalysis,
    EnvironmentProps,
    CameraDirector,
    LightingDesigner,
    SoundDesigner,
    MusicDirector,
    PromptSynthesis,
}

impl Department {
    pub const ALL: [Department; 8] = [
        Department::ScriptBreakdown,
        Department::CharacterAnalysis,
        Department::EnvironmentProps,
        Department::CameraDirector,
        Department::LightingDesigner,
        Department::SoundDesigner,
        Department::MusicDirector,
        Department::PromptSynthesis,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Department::ScriptBreakdown => "script_breakdown",
            Department::CharacterAnalysis => "character_analysis",
            Department::EnvironmentProps => "environment_props",
            Department::CameraDirector => "camera_director",
            Department::LightingDesigner => "lighting_designer",
            Department::SoundDesigner => "sound_designer",
            Department::MusicDirector => "music_director",
            Department::PromptSynthesis => "prompt_synthesis",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Department::ScriptBreakdown => "Script Breakdown Agent",
            Department::CharacterAnalysis => "Character Analysis Agent",
            Department::EnvironmentProps => "Environment & Props Agent",
            Department::CameraDirector => "Camera Director Agent",
            Department::LightingDesigner => "Lighting Designer Agent",
            Department::SoundDesigner => "Sound Designer Agent",
            Department::MusicDirector => "Music Director Agent",
            Department::PromptSynthesis => "Prompt Synthesis Agent",
        }
    }

    pub fn role(self) -> &'static str {
        match self {
            Department::ScriptBreakdown => {
                "Analyzes script structure, identifies scenes, shots, and dramatic beats"
            }
            Department::CharacterAnalysis => {
                "Tracks character profiles, emotional arcs, and relationships"
            }
            Department::EnvironmentProps => "Identifies locations, set pieces, and required props",
            Department::CameraDirector => "Determines camera angles, movements, and shot compositions",
            Department::LightingDesigner => "Plans lighting setups, mood, and visual atmosphere",
            Department::SoundDesigner => "Designs soundscapes, effects, and ambient audio",
            Department::MusicDirector => "Selects musical themes, timing, and emotional scoring",
            Department::PromptSynthesis => "Combines all agent outputs into unified Veo3 prompts",
        }
    }

    /// Output folder for per-shot department notes; synthesis feeds the prompts instead.
    pub fn output_folder(self) -> Option<&'static str> {
        match self {
            Department::CameraDirector => Some("06_Camera"),
            Department::LightingDesigner => Some("07_Lighting"),
            Department::SoundDesigner => Some("08_Sound"),
            Department::MusicDirector => Some("09_Music"),
            Department::CharacterAnalysis => Some("10_Characters"),
            Department::EnvironmentProps => Some("11_Environments"),
            Department::ScriptBreakdown => Some("12_Breakdown"),
            Department::PromptSynthesis => None,
        }
    }

    /// File name of the agent prompt inside a project's `agents/` folder.
    pub fn prompt_file_name(self) -> String {
        format!("{}.md", self.key())
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
