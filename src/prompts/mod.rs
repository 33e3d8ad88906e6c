//! Prompt synthesis for video-generation models.
//!
//! Three renditions exist per shot: the compact tagged prompt written next to
//! the shot JSON, the natural-language prompt built from the crew's plans, and
//! the enhanced prompt that adds consistent character descriptions and the
//! spoken content of the shot.
mod characters;
mod enhanced;
mod natural;
mod tagged;

pub use characters::{CharacterProfile, CharacterRegistry};
pub use enhanced::{
    enhanced_prompt, master_file as enhanced_master_file, EnhancedPrompt, ENHANCED_DIR,
    ENHANCED_MASTER_FILE,
};
pub use natural::{
    master_file as natural_master_file, natural_prompt, NaturalPrompt, NATURAL_DIR,
    NATURAL_MASTER_FILE,
};
pub use tagged::{segment_prompt, shot_prompt, SegmentPrompt, ShotPrompt, ShotPromptMetadata};

use crate::crew::{CharacterNote, ShotNotes};
use crate::screenplay::{Scene, Shot};
use crate::util::title_case;

/// A shot together with the crew's notes on it.
///
/// Accessors fall back to what the script itself says when a department left
/// a field empty, so a failed agent still yields a usable prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptSource<'a> {
    pub scene: &'a Scene,
    pub shot: &'a Shot,
    pub notes: &'a ShotNotes,
}

impl<'a> PromptSource<'a> {
    pub fn new(scene: &'a Scene, shot: &'a Shot, notes: &'a ShotNotes) -> Self {
        Self { scene, shot, notes }
    }

    pub fn characters(&self) -> &'a [CharacterNote] {
        &self.notes.characters.characters
    }

    pub fn location(&self) -> String {
        match self.notes.environment.location.as_str() {
            "" => title_case(&self.scene.location),
            location => location.to_string(),
        }
    }

    pub fn time_of_day(&self) -> &'a str {
        or(&self.notes.environment.time_of_day, &self.scene.time_of_day)
    }

    pub fn shot_type(&self) -> &'a str {
        or(&self.notes.camera.shot_type, &self.shot.shot_type)
    }

    pub fn camera_movement(&self) -> &'a str {
        let fallback = or(&self.shot.camera_movement, "static");
        or(&self.notes.camera.camera_movement, fallback)
    }

    pub fn mood(&self) -> &'a str {
        or(&self.notes.lighting.mood, "naturalistic")
    }

    pub fn atmosphere(&self) -> &'a str {
        or(&self.notes.lighting.atmosphere, "cinematic")
    }

    pub fn color_temperature(&self) -> &'a str {
        or(&self.notes.lighting.color_temperature, "5000K")
    }

    pub fn intensity(&self) -> &'a str {
        or(&self.notes.lighting.intensity, "balanced")
    }

    fn heading_is_interior(&self) -> bool {
        self.scene.heading.contains("INT")
    }
}

fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// `Label: text` lines for the non-empty sections, in order.
fn render_sections(sections: &[(&str, &str)]) -> String {
    sections
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|(label, text)| format!("{label}: {text}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join sentence fragments with `. ` and close with a full stop.
fn sentences(parts: &[String]) -> String {
    format!("{}.", parts.join(". "))
}

/// File stem for a shot's prompt files: `<stem>_scene<S>_shot<NNN>`.
pub fn shot_file_stem(script_stem: &str, shot: &Shot) -> String {
    format!(
        "{script_stem}_scene{}_shot{}",
        shot.scene_number,
        shot.padded_number()
    )
}

#[cfg(test)]
#[path = "prompts_tests.rs"]
mod tests;
