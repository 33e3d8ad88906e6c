//! Shot coverage planning for a parsed scene.
use super::model::{
    speaker_name, DialogueBlock, SceneType, Shot, ShotKind, VoiceOver, VoiceTiming,
};
use super::patterns::{movements_in, shot_type_in};
use crate::util::{contains_any, is_all_caps, push_unique, truncate_chars};

const CONTINUATION_MARKERS: [&str; 3] = ["CONTINUED", "CONT'D", "CONTINUOUS"];
const CLOSING_MARKERS: [&str; 2] = ["CUT TO", "FADE TO"];
const NOT_NAMES: [&str; 7] = ["THE", "AND", "BUT", "FOR", "WITH", "INTO", "OVER"];
const DESCRIPTION_LIMIT: usize = 200;

/// Everything shot planning needs to know about one scene.
pub(crate) struct SceneDraft<'a> {
    pub number: u32,
    pub location: &'a str,
    pub text: &'a str,
    pub scene_type: SceneType,
    pub action_blocks: &'a [String],
    pub dialogue_blocks: &'a [DialogueBlock],
    pub voice_overs: &'a [VoiceOver],
}

struct ShotBuilder<'a> {
    draft: &'a SceneDraft<'a>,
    shots: Vec<Shot>,
    next_number: u32,
}

impl<'a> ShotBuilder<'a> {
    fn new(draft: &'a SceneDraft<'a>) -> Self {
        Self {
            draft,
            shots: Vec::new(),
            next_number: 1,
        }
    }

    fn shot(&mut self, kind: ShotKind, shot_type: &str, description: String) -> Shot {
        let number = self.next_number;
        self.next_number += 1;
        let scene_type = self.draft.scene_type;
        Shot {
            shot_id: format!("{}-{number:03}", self.draft.number),
            scene_number: self.draft.number,
            shot_number: number,
            shot_type: shot_type.to_string(),
            description,
            duration: String::new(),
            camera_movement: String::new(),
            characters_in_frame: Vec::new(),
            dialogue: Vec::new(),
            voice_overs: Vec::new(),
            is_flashback: scene_type == SceneType::Flashback && kind != ShotKind::Closing,
            is_montage: scene_type == SceneType::Montage && kind == ShotKind::Action,
            visual_effects: visual_effects_for(scene_type).to_string(),
            kind,
        }
    }
}

/// Plan establishing, action, dialogue, montage and closing coverage for a scene.
pub(crate) fn generate_shots(draft: &SceneDraft<'_>) -> Vec<Shot> {
    let mut builder = ShotBuilder::new(draft);
    let opening = truncate_chars(draft.text, 50);

    if !CONTINUATION_MARKERS
        .iter()
        .any(|marker| opening.contains(marker))
    {
        let description = match draft.action_blocks.first() {
            Some(action) => truncate_chars(action, DESCRIPTION_LIMIT),
            None => format!("Establishing {}", draft.location),
        };
        let mut shot = builder.shot(ShotKind::Establishing, "WIDE ESTABLISHING", description);
        shot.duration = "5-8 seconds".to_string();
        shot.camera_movement = "slow push in or crane".to_string();
        builder.shots.push(shot);
    }

    let scene_voices: Vec<VoiceOver> = draft
        .voice_overs
        .iter()
        .filter(|voice| voice.timing == VoiceTiming::DuringScene)
        .cloned()
        .collect();
    for action in draft.action_blocks {
        let shot_type = shot_type_in(action);
        let movements = movements_in(action);
        if shot_type.is_none() && movements.is_empty() && action.chars().count() <= 100 {
            continue;
        }
        let mut shot = builder.shot(
            ShotKind::Action,
            shot_type.unwrap_or("MEDIUM"),
            truncate_chars(action, DESCRIPTION_LIMIT),
        );
        shot.duration = estimate_duration(action, shot_type).to_string();
        shot.camera_movement = if movements.is_empty() {
            "static".to_string()
        } else {
            movements
                .iter()
                .map(|movement| movement.to_lowercase())
                .collect::<Vec<_>>()
                .join(" ")
        };
        shot.characters_in_frame = characters_in_action(action);
        shot.voice_overs = scene_voices.clone();
        builder.shots.push(shot);
    }

    let mut current: Option<Shot> = None;
    for block in draft.dialogue_blocks {
        let speaker = speaker_name(&block.character);
        let spoken = block.lines.join(" ");
        let continues = current
            .as_ref()
            .is_some_and(|shot| !needs_new_shot(shot));
        if continues {
            if let Some(shot) = current.as_mut() {
                shot.dialogue.push(spoken);
                push_unique(&mut shot.characters_in_frame, speaker);
            }
            continue;
        }
        if let Some(done) = current.take() {
            builder.shots.push(done);
        }
        let shot_type = dialogue_shot_type(builder.shots.len());
        let mut shot = builder.shot(
            ShotKind::Dialogue,
            shot_type,
            format!("Dialogue: {}", block.character),
        );
        shot.duration = "3-5 seconds".to_string();
        shot.camera_movement = "subtle drift".to_string();
        shot.characters_in_frame = vec![speaker.to_string()];
        shot.dialogue = vec![spoken];
        current = Some(shot);
    }
    if let Some(done) = current.take() {
        builder.shots.push(done);
    }

    for voice in draft
        .voice_overs
        .iter()
        .filter(|voice| voice.timing == VoiceTiming::Transitional)
    {
        let mut shot = builder.shot(
            ShotKind::Montage,
            "VARIOUS",
            format!("Voice-over montage: {}", voice.character),
        );
        shot.duration = "5-10 seconds".to_string();
        shot.camera_movement = "various".to_string();
        shot.voice_overs = vec![voice.clone()];
        shot.is_flashback = false;
        shot.is_montage = true;
        builder.shots.push(shot);
    }

    let closing = last_chars(draft.text, 50);
    if builder.shots.len() > 3 && !contains_any(closing, &CLOSING_MARKERS) {
        let mut shot = builder.shot(
            ShotKind::Closing,
            "WIDE",
            format!("Scene closing - {}", draft.location),
        );
        shot.duration = "3-5 seconds".to_string();
        shot.camera_movement = "pull back or static".to_string();
        shot.visual_effects = String::new();
        builder.shots.push(shot);
    }

    builder.shots
}

fn needs_new_shot(shot: &Shot) -> bool {
    shot.characters_in_frame.len() >= 2 || shot.dialogue.len() >= 3
}

fn dialogue_shot_type(shots_so_far: usize) -> &'static str {
    if shots_so_far == 0 {
        "MEDIUM"
    } else if shots_so_far % 3 == 0 {
        "CLOSE-UP"
    } else if shots_so_far % 2 == 0 {
        "OVER-THE-SHOULDER"
    } else {
        "MEDIUM"
    }
}

pub(crate) fn estimate_duration(text: &str, shot_type: Option<&str>) -> &'static str {
    let words = text.split_whitespace().count();
    if shot_type == Some("WIDE") {
        "5-8 seconds"
    } else if words > 50 {
        "5-7 seconds"
    } else if words > 20 {
        "3-5 seconds"
    } else {
        "2-3 seconds"
    }
}

/// All-caps alphabetic words that read as names.
pub(crate) fn characters_in_action(action: &str) -> Vec<String> {
    let mut names = Vec::new();
    for word in action.split_whitespace() {
        if word.chars().count() > 2
            && word.chars().all(char::is_alphabetic)
            && is_all_caps(word)
            && !NOT_NAMES.contains(&word)
        {
            push_unique(&mut names, word);
        }
    }
    names
}

fn visual_effects_for(scene_type: SceneType) -> &'static str {
    match scene_type {
        SceneType::Flashback => "Desaturated, soft-focus memory treatment",
        SceneType::Dream => "Ethereal glow and soft diffusion",
        SceneType::Montage | SceneType::Present => "",
    }
}

fn last_chars(text: &str, count: usize) -> &str {
    let total = text.chars().count();
    match text.char_indices().nth(total.saturating_sub(count)) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

#[cfg(test)]
#[path = "shots_tests.rs"]
mod tests;
