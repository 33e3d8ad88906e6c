//! Scene summaries and the script-level overview built from them.
use crate::screenplay::{characters_in_action, Scene};
use crate::util::{contains_any, push_unique};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

pub const SUMMARIES_DIR: &str = "Scene_Summaries";

const MAX_CHARACTERS: usize = 5;
const MAX_KEY_ACTIONS: usize = 3;
const MAX_VOICE_OVERS: usize = 3;
const KEY_ACTION_MIN_CHARS: usize = 20;
const KEY_ACTION_MAX_CHARS: usize = 100;

/// Tone keywords, checked in order against the lower-cased scene text.
const TONES: [(&str, &[&str]); 7] = [
    ("tense", &["nervous", "worried", "anxious", "fear", "threat"]),
    ("dramatic", &["shock", "surprise", "reveal", "discover"]),
    ("romantic", &["love", "kiss", "embrace", "tender", "gentle"]),
    ("action", &["run", "chase", "fight", "escape", "rush"]),
    ("contemplative", &["think", "consider", "ponder", "reflect"]),
    ("melancholic", &["sad", "cry", "tears", "loss", "goodbye"]),
    ("hopeful", &["hope", "future", "promise", "new", "begin"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneSummary {
    pub scene_number: u32,
    pub location: String,
    pub time_of_day: String,
    pub characters: Vec<String>,
    pub shot_count: usize,
    pub total_duration: String,
    pub key_actions: Vec<String>,
    pub voice_overs: Vec<String>,
    pub emotional_tone: String,
    pub narrative_purpose: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneBreakdownEntry {
    pub scene: u32,
    pub location: String,
    pub time: String,
    pub shots: usize,
    pub tone: String,
    pub purpose: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MasterSummary {
    pub script_name: String,
    pub generated_at: String,
    pub total_scenes: usize,
    pub total_shots: usize,
    pub estimated_duration: String,
    pub main_characters: Vec<String>,
    pub locations: Vec<String>,
    pub emotional_arc: String,
    pub scene_breakdown: Vec<SceneBreakdownEntry>,
}

pub fn summarize_scene(scene: &Scene) -> SceneSummary {
    let mut characters = scene.speakers();
    for name in characters_in_action(&scene.action_blocks.join(" ")) {
        push_unique(&mut characters, &name);
    }
    characters.truncate(MAX_CHARACTERS);

    SceneSummary {
        scene_number: scene.scene_number,
        location: scene.location.clone(),
        time_of_day: scene.time_of_day.clone(),
        characters,
        shot_count: scene.shots.len(),
        total_duration: scene_duration(scene.shots.len()),
        key_actions: key_actions(&scene.text),
        voice_overs: scene
            .voice_overs
            .iter()
            .take(MAX_VOICE_OVERS)
            .map(|voice| voice.text.clone())
            .collect(),
        emotional_tone: emotional_tone(&scene.text).to_string(),
        narrative_purpose: narrative_purpose(scene.scene_number, &scene.text).to_string(),
    }
}

/// `3-5` seconds per shot; whole minutes once the low end reaches a minute.
pub fn scene_duration(shots: usize) -> String {
    if shots == 0 {
        return "0 seconds".to_string();
    }
    let (min, max) = (shots * 3, shots * 5);
    if min < 60 {
        format!("{min}-{max} seconds")
    } else {
        format!("{}-{} minutes", min / 60, max / 60)
    }
}

fn key_actions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("INT.") && !line.starts_with("EXT."))
        .filter(|line| !["(", "FADE", "CUT"].iter().any(|p| line.starts_with(p)))
        .filter(|line| line.chars().count() > KEY_ACTION_MIN_CHARS)
        .take(MAX_KEY_ACTIONS)
        .map(|line| crate::util::truncate_chars(line, KEY_ACTION_MAX_CHARS))
        .collect()
}

/// Keyword tone of a passage; `neutral` when nothing matches.
pub fn emotional_tone(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    TONES
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(tone, _)| *tone)
        .unwrap_or("neutral")
}

pub fn narrative_purpose(scene_number: u32, text: &str) -> &'static str {
    let lower = text.to_lowercase();
    if scene_number <= 1 {
        "Opening - Establish world and characters"
    } else if scene_number <= 3 {
        "Setup - Introduce conflict and stakes"
    } else if lower.contains("reveal") {
        "Revelation - Key information revealed"
    } else if lower.contains("confrontation") {
        "Confrontation - Characters clash"
    } else {
        "Development - Advance plot and character arcs"
    }
}

pub fn master_summary(
    script_name: &str,
    summaries: &[SceneSummary],
    generated_at: &str,
) -> MasterSummary {
    let total_shots: usize = summaries.iter().map(|summary| summary.shot_count).sum();
    MasterSummary {
        script_name: script_name.to_string(),
        generated_at: generated_at.to_string(),
        total_scenes: summaries.len(),
        total_shots,
        estimated_duration: format!("{}-{} minutes", total_shots * 3 / 60, total_shots * 5 / 60),
        main_characters: main_characters(summaries),
        locations: summaries
            .iter()
            .map(|summary| format!("{} - {}", summary.location, summary.time_of_day))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        emotional_arc: emotional_arc(summaries).to_string(),
        scene_breakdown: summaries
            .iter()
            .map(|summary| SceneBreakdownEntry {
                scene: summary.scene_number,
                location: summary.location.clone(),
                time: summary.time_of_day.clone(),
                shots: summary.shot_count,
                tone: summary.emotional_tone.clone(),
                purpose: summary.narrative_purpose.clone(),
            })
            .collect(),
    }
}

/// Most frequent characters; ties keep first-seen order.
fn main_characters(summaries: &[SceneSummary]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in summaries.iter().flat_map(|summary| &summary.characters) {
        push_unique(&mut order, name);
        *counts.entry(name.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<(usize, String)> = order
        .into_iter()
        .map(|name| (counts.get(name.as_str()).copied().unwrap_or(0), name))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked
        .into_iter()
        .take(MAX_CHARACTERS)
        .map(|(_, name)| name)
        .collect()
}

fn emotional_arc(summaries: &[SceneSummary]) -> &'static str {
    let (Some(first), Some(last)) = (summaries.first(), summaries.last()) else {
        return "Unknown";
    };
    let (start, end) = (first.emotional_tone.as_str(), last.emotional_tone.as_str());
    if start == "neutral" && end == "hopeful" {
        "Ascending - Moves toward hope"
    } else if start == "hopeful" && (end == "melancholic" || end == "tense") {
        "Descending - Moves toward conflict"
    } else if summaries
        .iter()
        .any(|summary| summary.emotional_tone == "dramatic")
    {
        "Dramatic - Building tension and release"
    } else {
        "Steady - Consistent emotional tone"
    }
}

pub fn render_overview(master: &MasterSummary) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();
    out.push_str(&format!(
        "{rule}\nFILM PRODUCTION OVERVIEW: {}\n{rule}\n\n",
        master.script_name
    ));
    out.push_str(&format!("Total Scenes: {}\n", master.total_scenes));
    out.push_str(&format!("Total Shots: {}\n", master.total_shots));
    out.push_str(&format!(
        "Estimated Duration: {}\n\n",
        master.estimated_duration
    ));
    out.push_str("MAIN CHARACTERS:\n");
    for name in &master.main_characters {
        out.push_str(&format!("  • {name}\n"));
    }
    out.push_str("\nLOCATIONS:\n");
    for location in &master.locations {
        out.push_str(&format!("  • {location}\n"));
    }
    out.push_str(&format!("\nEMOTIONAL ARC: {}\n\n", master.emotional_arc));
    out.push_str("SCENE-BY-SCENE BREAKDOWN:\n");
    out.push_str(&"-".repeat(60));
    out.push('\n');
    for scene in &master.scene_breakdown {
        out.push_str(&format!(
            "\nScene {}: {} - {}\n  Shots: {} | Tone: {}\n  Purpose: {}\n",
            scene.scene, scene.location, scene.time, scene.shots, scene.tone, scene.purpose
        ));
    }
    out.push_str(&format!(
        "\n{rule}\nGenerated by film-crew\nTimestamp: {}\n{rule}\n",
        master.generated_at
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screenplay::parse_screenplay;

    const SCRIPT: &str = "\
INT. COFFEE SHOP - DAY

SARAH enters nervously, scanning the room for JAMES near the window.

SARAH
Is anyone here?

EXT. STREET - NIGHT

Rain hammers the pavement as SARAH walks alone toward the station.
";

    #[test]
    fn scene_summary_collects_speakers_actions_and_tone() {
        let screenplay = parse_screenplay(SCRIPT);
        let summary = summarize_scene(&screenplay.scenes[0]);
        assert_eq!(summary.characters, vec!["SARAH", "JAMES"]);
        assert_eq!(summary.emotional_tone, "tense");
        assert_eq!(
            summary.narrative_purpose,
            "Opening - Establish world and characters"
        );
        assert_eq!(
            summary.key_actions,
            vec!["SARAH enters nervously, scanning the room for JAMES near the window."]
        );
        assert_eq!(
            summary.total_duration,
            scene_duration(screenplay.scenes[0].shots.len())
        );
    }

    #[test]
    fn durations_switch_to_minutes() {
        assert_eq!(scene_duration(0), "0 seconds");
        assert_eq!(scene_duration(4), "12-20 seconds");
        assert_eq!(scene_duration(25), "1-2 minutes");
    }

    #[test]
    fn tone_table_is_checked_in_order() {
        assert_eq!(emotional_tone("A nervous kiss"), "tense");
        assert_eq!(emotional_tone("She cries quietly"), "melancholic");
        assert_eq!(emotional_tone("Silence."), "neutral");
    }

    #[test]
    fn narrative_purpose_depends_on_position_then_keywords() {
        assert_eq!(
            narrative_purpose(3, "reveal"),
            "Setup - Introduce conflict and stakes"
        );
        assert_eq!(
            narrative_purpose(7, "The big reveal"),
            "Revelation - Key information revealed"
        );
        assert_eq!(
            narrative_purpose(7, "quiet"),
            "Development - Advance plot and character arcs"
        );
    }

    #[test]
    fn master_summary_ranks_characters_and_sorts_locations() {
        let screenplay = parse_screenplay(SCRIPT);
        let summaries: Vec<SceneSummary> =
            screenplay.scenes.iter().map(summarize_scene).collect();
        let master = master_summary("coffee", &summaries, "2026-01-01T10:00:00");
        assert_eq!(master.total_scenes, 2);
        assert_eq!(master.main_characters, vec!["SARAH", "JAMES"]);
        assert_eq!(master.locations, vec!["COFFEE SHOP - DAY", "STREET - NIGHT"]);
        assert_eq!(master.emotional_arc, "Steady - Consistent emotional tone");

        let overview = render_overview(&master);
        assert!(overview.contains("FILM PRODUCTION OVERVIEW: coffee"));
        assert!(overview.contains("\nScene 2: STREET - NIGHT\n"));
    }
}
