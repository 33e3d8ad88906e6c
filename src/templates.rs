use crate::crew::Department;

pub const SCRIPT_BREAKDOWN_MD: &str = include_str!("../prompts/agents/script_breakdown.md");
pub const CHARACTER_ANALYSIS_MD: &str = include_str!("../prompts/agents/character_analysis.md");
pub const ENVIRONMENT_PROPS_MD: &str = include_str!("../prompts/agents/environment_props.md");
pub const CAMERA_DIRECTOR_MD: &str = include_str!("../prompts/agents/camera_director.md");
pub const LIGHTING_DESIGNER_MD: &str = include_str!("../prompts/agents/lighting_designer.md");
pub const SOUND_DESIGNER_MD: &str = include_str!("../prompts/agents/sound_designer.md");
pub const MUSIC_DIRECTOR_MD: &str = include_str!("../prompts/agents/music_director.md");
pub const PROMPT_SYNTHESIS_MD: &str = include_str!("../prompts/agents/prompt_synthesis.md");

/// Placeholder replaced with the shot context JSON when a prompt is rendered.
pub const SHOT_CONTEXT_PLACEHOLDER: &str = "{{shot_context}}";

/// Built-in agent prompt for a department.
pub fn agent_prompt(department: Department) -> &'static str {
    match department {
        Department::ScriptBreakdown => SCRIPT_BREAKDOWN_MD,
        Department::CharacterAnalysis => CHARACTER_ANALYSIS_MD,
        Department::EnvironmentProps => ENVIRONMENT_PROPS_MD,
        Department::CameraDirector => CAMERA_DIRECTOR_MD,
        Department::LightingDesigner => LIGHTING_DESIGNER_MD,
        Department::SoundDesigner => SOUND_DESIGNER_MD,
        Department::MusicDirector => MUSIC_DIRECTOR_MD,
        Department::PromptSynthesis => PROMPT_SYNTHESIS_MD,
    }
}
