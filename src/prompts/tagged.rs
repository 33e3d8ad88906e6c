use crate::screenplay::{Scene, Shot};
use crate::util::truncate_chars;
use crate::vignette::{Segment, Vignette};
use serde::Serialize;

const SEPARATOR: &str = " | ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShotPromptMetadata {
    pub scene: u32,
    pub shot: u32,
    #[serde(rename = "type")]
    pub shot_type: String,
}

/// Tagged prompt for one screenplay shot, as written to `05_Veo3_Prompts/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShotPrompt {
    pub shot_id: String,
    pub veo3_prompt: String,
    pub metadata: ShotPromptMetadata,
}

pub fn shot_prompt(scene: &Scene, shot: &Shot) -> ShotPrompt {
    let mut parts = vec![format!("[CAMERA] {}, {}", shot.shot_type, shot.camera_movement)];
    if shot.characters_in_frame.is_empty() {
        parts.push(format!("[SUBJECT] {}", truncate_chars(&shot.description, 100)));
    } else {
        parts.push(format!("[SUBJECT] {}", shot.characters_in_frame.join(", ")));
    }
    parts.push(format!(
        "[ENVIRONMENT] {}, {}",
        scene.location, scene.time_of_day
    ));
    if shot.is_flashback {
        parts.push("[EFFECT] Flashback treatment - desaturated, dreamy".to_string());
    }
    if shot.is_montage {
        parts.push("[EFFECT] Montage sequence - quick cuts".to_string());
    }
    if let Some(voice) = shot.voice_overs.first() {
        parts.push(format!("[AUDIO] Voice-over by {}", voice.character));
    }
    parts.push(format!("[DURATION] {}", shot.duration));

    ShotPrompt {
        shot_id: shot.shot_id.clone(),
        veo3_prompt: parts.join(SEPARATOR),
        metadata: ShotPromptMetadata {
            scene: scene.scene_number,
            shot: shot.shot_number,
            shot_type: shot.shot_type.clone(),
        },
    }
}

/// Tagged prompt for one vignette video segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentPrompt {
    pub segment_id: String,
    pub veo3_prompt: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub vignette: u32,
}

pub fn segment_prompt(vignette: &Vignette, segment: &Segment) -> SegmentPrompt {
    let content = segment.content.to_lowercase();
    let shot_type = if content.contains("establishing") || content.contains("wide") {
        "WIDE ESTABLISHING"
    } else if content.contains("close") {
        "CLOSE-UP"
    } else {
        "MEDIUM"
    };

    let mut parts = vec![
        format!("[SHOT TYPE] {shot_type}"),
        format!("[VISUAL] {}", truncate_chars(&segment.content, 200)),
    ];
    if !segment.characters_mentioned.is_empty() {
        parts.push(format!(
            "[CHARACTERS] {}",
            segment.characters_mentioned.join(", ")
        ));
    }
    if !segment.time_period.is_empty() {
        parts.push(format!("[TIME] {}", segment.time_period));
    }
    if !segment.on_screen_text.is_empty() {
        parts.push(format!("[TEXT OVERLAY] {}", segment.on_screen_text));
    }
    if !segment.narration.is_empty() {
        parts.push(format!("[AUDIO] {}", truncate_chars(&segment.narration, 100)));
    }

    SegmentPrompt {
        segment_id: segment.segment_id.clone(),
        veo3_prompt: parts.join(SEPARATOR),
        kind: "video",
        vignette: vignette.scene_number,
    }
}
