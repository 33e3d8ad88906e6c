//! Scene extraction and scene body parsing.
use super::model::{
    DialogueBlock, Scene, SceneType, Screenplay, Transition, VoiceKind, VoiceLine, VoiceOver,
    VoiceTiming,
};
use super::patterns::{
    transition_kind, CHARACTER_CUE, DREAM, FLASHBACK, MONTAGE, OFF_SCREEN_CUE, PARENTHETICAL,
    SCENE_HEADING, TRANSITION, VOICE_OVER_CUE,
};
use super::shots::{generate_shots, SceneDraft};
use super::stats::compute_stats;
use crate::util::is_all_caps;

/// Characters inspected on either side of a scene boundary for transitions.
const TRANSITION_WINDOW: usize = 100;

const PLACEHOLDER_HEADING: &str = "INT. LOCATION - DAY";

/// A scene heading located in the script text.
#[derive(Debug, Clone)]
pub(crate) struct SceneSpan {
    pub start: usize,
    pub end: usize,
    pub heading: String,
    pub location: String,
    pub time_of_day: String,
    pub heading_type: SceneType,
    pub has_heading: bool,
}

#[derive(Debug, Default)]
struct SceneBody {
    action_blocks: Vec<String>,
    dialogue_blocks: Vec<DialogueBlock>,
    voice_overs: Vec<VoiceOver>,
}

enum Speaker {
    Dialogue,
    VoiceOver { name: String, open: Option<usize> },
}

/// Parse a traditional screenplay into scenes, shots and statistics.
pub fn parse_screenplay(content: &str) -> Screenplay {
    let spans = scene_spans(content);
    let voice_lines = extract_voice_lines(content);
    let opening_narration: Vec<&VoiceLine> = match spans.first() {
        Some(first) if first.has_heading => voice_lines
            .iter()
            .filter(|line| line.kind == VoiceKind::VoiceOver && line.position < first.start)
            .collect(),
        _ => Vec::new(),
    };

    let total = spans.len();
    let scenes: Vec<Scene> = spans
        .iter()
        .enumerate()
        .map(|(idx, span)| {
            let number = idx as u32 + 1;
            let transitional: Vec<VoiceOver> = if idx == 0 {
                opening_narration
                    .iter()
                    .map(|line| VoiceOver {
                        character: line.character.clone(),
                        text: line.text.clone(),
                        scene_context: span.heading.clone(),
                        timing: VoiceTiming::Transitional,
                        kind: VoiceKind::VoiceOver,
                        emotional_tone: String::new(),
                    })
                    .collect()
            } else {
                Vec::new()
            };
            process_scene(content, span, number, total, transitional)
        })
        .collect();

    let stats = compute_stats(&scenes, &voice_lines);
    tracing::debug!(
        scenes = stats.total_scenes,
        shots = stats.total_shots,
        voice_overs = stats.total_voice_overs,
        "screenplay parsed"
    );
    Screenplay {
        scenes,
        voice_lines,
        stats,
    }
}

pub(crate) fn scene_spans(content: &str) -> Vec<SceneSpan> {
    let matches: Vec<_> = SCENE_HEADING.captures_iter(content).collect();
    if matches.is_empty() {
        return vec![SceneSpan {
            start: 0,
            end: content.len(),
            heading: PLACEHOLDER_HEADING.to_string(),
            location: "LOCATION".to_string(),
            time_of_day: "DAY".to_string(),
            heading_type: SceneType::Present,
            has_heading: false,
        }];
    }

    let starts: Vec<usize> = matches
        .iter()
        .filter_map(|caps| caps.get(0).map(|m| m.start()))
        .collect();
    matches
        .iter()
        .enumerate()
        .map(|(idx, caps)| {
            let int_ext = caps.get(1).map_or("", |m| m.as_str());
            let location = caps.get(2).map_or("", |m| m.as_str().trim());
            let time = caps.get(3).map_or("", |m| m.as_str().trim());
            let extra = caps.get(4).map(|m| m.as_str().trim());

            let mut heading = format!("{int_ext} {location} - {time}");
            let mut heading_type = SceneType::Present;
            if let Some(extra) = extra {
                heading.push_str(" - ");
                heading.push_str(extra);
                if FLASHBACK.is_match(extra) {
                    heading_type = SceneType::Flashback;
                }
            }
            SceneSpan {
                start: starts[idx],
                end: starts.get(idx + 1).copied().unwrap_or(content.len()),
                heading,
                location: location.to_string(),
                time_of_day: time.to_string(),
                heading_type,
                has_heading: true,
            }
        })
        .collect()
}

fn process_scene(
    content: &str,
    span: &SceneSpan,
    number: u32,
    total: usize,
    transitional: Vec<VoiceOver>,
) -> Scene {
    let text = &content[span.start..span.end];
    let body_lines: Vec<&str> = if span.has_heading {
        text.lines().skip(1).collect()
    } else {
        text.lines().collect()
    };
    let mut body = parse_body(&body_lines, &span.heading);
    body.voice_overs.extend(transitional);

    let scene_type = detect_scene_type(text, span.heading_type);
    let shots = generate_shots(&SceneDraft {
        number,
        location: &span.location,
        text,
        scene_type,
        action_blocks: &body.action_blocks,
        dialogue_blocks: &body.dialogue_blocks,
        voice_overs: &body.voice_overs,
    });

    let transition_in = preceding_transition(content, span.start).map(|kind| Transition {
        kind,
        from_scene: if number > 1 {
            (number - 1).to_string()
        } else {
            "OPENING".to_string()
        },
        to_scene: number.to_string(),
    });
    let transition_out = closing_transition(content, span).map(|kind| Transition {
        kind,
        from_scene: number.to_string(),
        to_scene: if (number as usize) < total {
            (number + 1).to_string()
        } else {
            "END".to_string()
        },
    });

    Scene {
        scene_number: number,
        heading: span.heading.clone(),
        location: span.location.clone(),
        time_of_day: span.time_of_day.clone(),
        scene_type,
        description: body.action_blocks.first().cloned().unwrap_or_default(),
        action_blocks: body.action_blocks,
        dialogue_blocks: body.dialogue_blocks,
        voice_overs: body.voice_overs,
        shots,
        transition_in,
        transition_out,
        text: text.to_string(),
    }
}

fn parse_body(lines: &[&str], heading: &str) -> SceneBody {
    let mut body = SceneBody::default();
    let mut action: Vec<&str> = Vec::new();
    let mut speaker: Option<Speaker> = None;

    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            flush_action(&mut action, &mut body.action_blocks);
            speaker = None;
            continue;
        }
        if TRANSITION.is_match(line) {
            flush_action(&mut action, &mut body.action_blocks);
            speaker = None;
            continue;
        }
        if let Some(caps) = VOICE_OVER_CUE.captures(line) {
            flush_action(&mut action, &mut body.action_blocks);
            speaker = Some(Speaker::VoiceOver {
                name: caps[1].trim().to_string(),
                open: None,
            });
            continue;
        }
        if CHARACTER_CUE.is_match(line) && is_all_caps(line) {
            flush_action(&mut action, &mut body.action_blocks);
            body.dialogue_blocks.push(DialogueBlock {
                character: line.to_string(),
                lines: Vec::new(),
            });
            speaker = Some(Speaker::Dialogue);
            continue;
        }

        match speaker.as_mut() {
            Some(_) if PARENTHETICAL.is_match(line) => {}
            Some(Speaker::Dialogue) => {
                if let Some(block) = body.dialogue_blocks.last_mut() {
                    block.lines.push(line.to_string());
                }
            }
            Some(Speaker::VoiceOver { name, open }) => match open {
                Some(idx) => {
                    let voice = &mut body.voice_overs[*idx];
                    voice.text.push(' ');
                    voice.text.push_str(line);
                }
                None => {
                    body.voice_overs.push(VoiceOver {
                        character: name.clone(),
                        text: line.to_string(),
                        scene_context: heading.to_string(),
                        timing: VoiceTiming::DuringScene,
                        kind: VoiceKind::VoiceOver,
                        emotional_tone: String::new(),
                    });
                    *open = Some(body.voice_overs.len() - 1);
                }
            },
            None => action.push(line),
        }
    }
    flush_action(&mut action, &mut body.action_blocks);
    body
}

fn flush_action(action: &mut Vec<&str>, blocks: &mut Vec<String>) {
    if !action.is_empty() {
        blocks.push(action.join(" "));
        action.clear();
    }
}

pub(crate) fn detect_scene_type(text: &str, heading_type: SceneType) -> SceneType {
    if FLASHBACK.is_match(text) {
        SceneType::Flashback
    } else if DREAM.is_match(text) {
        SceneType::Dream
    } else if MONTAGE.is_match(text) {
        SceneType::Montage
    } else {
        heading_type
    }
}

/// Every `NAME (V.O.)` / `NAME (O.S.)` cue in the script with the lines it carries.
pub(crate) fn extract_voice_lines(content: &str) -> Vec<VoiceLine> {
    let mut found = Vec::new();
    let mut offset = 0;
    let lines: Vec<(usize, &str)> = content
        .split('\n')
        .map(|line| {
            let start = offset;
            offset += line.len() + 1;
            (start, line)
        })
        .collect();

    for (idx, (position, line)) in lines.iter().enumerate() {
        let cue = line.trim();
        let (caps, kind) = match VOICE_OVER_CUE.captures(cue) {
            Some(caps) => (caps, VoiceKind::VoiceOver),
            None => match OFF_SCREEN_CUE.captures(cue) {
                Some(caps) => (caps, VoiceKind::OffScreen),
                None => continue,
            },
        };
        let mut text = Vec::new();
        for (_, next) in &lines[idx + 1..] {
            let next = next.trim();
            if next.is_empty() || CHARACTER_CUE.is_match(next) {
                break;
            }
            if !PARENTHETICAL.is_match(next) {
                text.push(next);
            }
        }
        if !text.is_empty() {
            found.push(VoiceLine {
                character: caps[1].trim().to_string(),
                text: text.join(" "),
                position: *position,
                kind,
            });
        }
    }
    found
}

fn preceding_transition(content: &str, start: usize) -> Option<String> {
    let from = char_boundary_at_or_before(content, start.saturating_sub(TRANSITION_WINDOW));
    let window = &content[from..start];
    TRANSITION
        .captures_iter(window)
        .last()
        .and_then(|caps| transition_kind(caps.get(0)?.as_str()))
}

/// The scene's own closing transition, else one just past its end.
fn closing_transition(content: &str, span: &SceneSpan) -> Option<String> {
    let tail_from = char_boundary_at_or_before(
        content,
        span.end.saturating_sub(TRANSITION_WINDOW).max(span.start),
    );
    let tail = &content[tail_from..span.end];
    if let Some(kind) = first_transition(tail) {
        return Some(kind);
    }
    let after_to = char_boundary_at_or_before(
        content,
        (span.end + TRANSITION_WINDOW).min(content.len()),
    );
    first_transition(&content[span.end..after_to])
}

fn first_transition(window: &str) -> Option<String> {
    TRANSITION
        .find(window)
        .and_then(|found| transition_kind(found.as_str()))
}

fn char_boundary_at_or_before(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
