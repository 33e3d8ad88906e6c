//! `MASTER_INDEX.json` and the human-readable analysis reports.
use crate::screenplay::{SceneType, Screenplay, ScriptStats};
use crate::vignette::{VignetteScript, VignetteStats};
use serde::Serialize;
use std::collections::BTreeSet;

pub(super) const MASTER_INDEX_FILE: &str = "MASTER_INDEX.json";
pub(super) const ANALYSIS_REPORT_FILE: &str = "ANALYSIS_REPORT.txt";
pub(super) const VIGNETTE_REPORT_FILE: &str = "VIGNETTE_ANALYSIS_REPORT.txt";

/// Seconds of screen time assumed per shot in the runtime estimate.
const SECONDS_PER_SHOT: usize = 4;

#[derive(Debug, Serialize)]
pub(super) struct MasterIndex<'a> {
    project: &'a str,
    generated: &'a str,
    version: &'static str,
    statistics: &'a ScriptStats,
    structure: SceneStructure,
    summary: IndexSummary,
}

#[derive(Debug, Serialize)]
struct SceneStructure {
    scenes: Vec<SceneEntry>,
}

#[derive(Debug, Serialize)]
struct SceneEntry {
    number: u32,
    heading: String,
    #[serde(rename = "type")]
    scene_type: SceneType,
    shots: usize,
    voice_overs: usize,
    has_flashback: bool,
    transitions: TransitionPair,
}

#[derive(Debug, Serialize)]
struct TransitionPair {
    #[serde(rename = "in")]
    into: Option<String>,
    out: Option<String>,
}

#[derive(Debug, Serialize)]
struct IndexSummary {
    total_runtime_estimate: String,
    narrative_elements: NarrativeElements,
    technical_breakdown: TechnicalBreakdown,
}

#[derive(Debug, Serialize)]
struct NarrativeElements {
    present_scenes: usize,
    flashback_scenes: usize,
    montage_scenes: usize,
    voice_overs: usize,
}

#[derive(Debug, Serialize)]
struct TechnicalBreakdown {
    wide_shots: usize,
    medium_shots: usize,
    close_ups: usize,
    dialogue_shots: usize,
    action_shots: usize,
}

pub(super) fn master_index<'a>(
    project: &'a str,
    generated: &'a str,
    screenplay: &'a Screenplay,
) -> MasterIndex<'a> {
    let stats = &screenplay.stats;
    let scenes = screenplay
        .scenes
        .iter()
        .map(|scene| SceneEntry {
            number: scene.scene_number,
            heading: scene.heading.clone(),
            scene_type: scene.scene_type,
            shots: scene.shots.len(),
            voice_overs: scene.voice_overs.len(),
            has_flashback: scene.scene_type == SceneType::Flashback,
            transitions: TransitionPair {
                into: scene.transition_in.as_ref().map(|t| t.kind.clone()),
                out: scene.transition_out.as_ref().map(|t| t.kind.clone()),
            },
        })
        .collect();

    MasterIndex {
        project,
        generated,
        version: env!("CARGO_PKG_VERSION"),
        statistics: stats,
        structure: SceneStructure { scenes },
        summary: IndexSummary {
            total_runtime_estimate: format!(
                "{} seconds (approx)",
                stats.total_shots * SECONDS_PER_SHOT
            ),
            narrative_elements: NarrativeElements {
                present_scenes: stats
                    .scene_types
                    .get(SceneType::Present.as_str())
                    .copied()
                    .unwrap_or(0),
                flashback_scenes: stats.flashback_scenes,
                montage_scenes: stats.montage_scenes,
                voice_overs: stats.total_voice_overs,
            },
            technical_breakdown: TechnicalBreakdown {
                wide_shots: stats.shot_type_count("WIDE")
                    + stats.shot_type_count("WIDE ESTABLISHING"),
                medium_shots: stats.shot_type_count("MEDIUM"),
                close_ups: stats.shot_type_count("CLOSE-UP"),
                dialogue_shots: stats.dialogue_shots,
                action_shots: stats.action_shots,
            },
        },
    }
}

fn heading(title: &str, generated: &str) -> Vec<String> {
    vec![
        title.to_string(),
        "=".repeat(50),
        String::new(),
        format!("Generated: {generated}"),
        String::new(),
    ]
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.push("-".repeat(20));
}

/// `ANALYSIS_REPORT.txt`; `generated` is a display timestamp.
pub(super) fn analysis_report(screenplay: &Screenplay, generated: &str) -> String {
    let stats = &screenplay.stats;
    let mut lines = heading("FILM CREW - SCRIPT ANALYSIS REPORT", generated);
    lines.push("OVERVIEW".to_string());
    lines.push("-".repeat(20));
    lines.push(format!("Total Scenes: {}", stats.total_scenes));
    lines.push(format!("Total Shots: {}", stats.total_shots));
    lines.push(format!("Total Voice-Overs: {}", stats.total_voice_overs));

    section(&mut lines, "SCENE BREAKDOWN");
    for scene in &screenplay.scenes {
        lines.push(format!("\nScene {}: {}", scene.scene_number, scene.heading));
        lines.push(format!("  Type: {}", scene.scene_type));
        lines.push(format!("  Shots: {}", scene.shots.len()));
        lines.push(format!("  Voice-Overs: {}", scene.voice_overs.len()));
        lines.push(format!("  Location: {}", scene.location));
        lines.push(format!("  Time: {}", scene.time_of_day));
        if let Some(transition) = &scene.transition_in {
            lines.push(format!("  Transition In: {}", transition.kind));
        }
        if let Some(transition) = &scene.transition_out {
            lines.push(format!("  Transition Out: {}", transition.kind));
        }
    }

    section(&mut lines, "SHOT TYPE DISTRIBUTION");
    for (shot_type, count) in &stats.shot_types {
        lines.push(format!("  {shot_type}: {count}"));
    }

    section(&mut lines, "VOICE-OVER SUMMARY");
    let narrators: BTreeSet<&str> = screenplay
        .scenes
        .iter()
        .flat_map(|scene| &scene.voice_overs)
        .map(|vo| vo.character.as_str())
        .collect();
    for name in narrators {
        lines.push(format!("  {name}: Voice-over narration"));
    }
    lines.join("\n")
}

#[derive(Debug, Serialize)]
pub(super) struct VignetteIndex<'a> {
    project: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    generated: &'a str,
    version: &'static str,
    statistics: &'a VignetteStats,
    structure: VignetteStructure,
    summary: VignetteSummary<'a>,
}

#[derive(Debug, Serialize)]
struct VignetteStructure {
    vignettes: Vec<VignetteEntry>,
}

#[derive(Debug, Serialize)]
struct VignetteEntry {
    number: u32,
    title: String,
    video_segments: usize,
    vo_segments: usize,
    characters: Vec<String>,
    locations: Vec<String>,
}

#[derive(Debug, Serialize)]
struct VignetteSummary<'a> {
    total_vignettes: usize,
    total_segments: usize,
    video_segments: usize,
    vo_segments: usize,
    text_overlays: usize,
    unique_characters: usize,
    unique_locations: usize,
    time_periods: &'a [String],
}

pub(super) fn vignette_index<'a>(
    project: &'a str,
    generated: &'a str,
    script: &'a VignetteScript,
) -> VignetteIndex<'a> {
    let stats = &script.stats;
    VignetteIndex {
        project,
        kind: "vignette_script",
        generated,
        version: env!("CARGO_PKG_VERSION"),
        statistics: stats,
        structure: VignetteStructure {
            vignettes: script
                .vignettes
                .iter()
                .map(|vignette| VignetteEntry {
                    number: vignette.scene_number,
                    title: vignette.scene_title.clone(),
                    video_segments: vignette.total_video_segments,
                    vo_segments: vignette.total_vo_segments,
                    characters: vignette.characters.clone(),
                    locations: vignette.locations.clone(),
                })
                .collect(),
        },
        summary: VignetteSummary {
            total_vignettes: script.vignettes.len(),
            total_segments: stats.total_segments,
            video_segments: stats.total_video_segments,
            vo_segments: stats.total_vo_segments,
            text_overlays: stats.total_text_overlays,
            unique_characters: stats.characters.len(),
            unique_locations: stats.locations.len(),
            time_periods: &stats.time_periods,
        },
    }
}

fn bullet_list(lines: &mut Vec<String>, items: &[String], empty: &str) {
    if items.is_empty() {
        lines.push(format!("  {empty}"));
    }
    for item in items {
        lines.push(format!("  • {item}"));
    }
}

/// `VIGNETTE_ANALYSIS_REPORT.txt`; `generated` is a display timestamp.
pub(super) fn vignette_report(script: &VignetteScript, generated: &str) -> String {
    let stats = &script.stats;
    let mut lines = heading("FILM CREW - VIGNETTE SCRIPT ANALYSIS REPORT", generated);
    lines.push("OVERVIEW".to_string());
    lines.push("-".repeat(20));
    lines.push(format!("Total Vignettes: {}", stats.total_scenes));
    lines.push(format!("Total Segments: {}", stats.total_segments));
    lines.push(format!("  - Video Segments: {}", stats.total_video_segments));
    lines.push(format!("  - VO Segments: {}", stats.total_vo_segments));
    lines.push(format!("  - Text Overlays: {}", stats.total_text_overlays));

    section(&mut lines, "CHARACTERS IDENTIFIED");
    bullet_list(
        &mut lines,
        &stats.characters,
        "No specific characters identified",
    );
    section(&mut lines, "LOCATIONS");
    bullet_list(&mut lines, &stats.locations, "No specific locations identified");
    section(&mut lines, "TIME PERIODS");
    bullet_list(
        &mut lines,
        &stats.time_periods,
        "No specific time periods identified",
    );

    section(&mut lines, "VIGNETTE BREAKDOWN");
    for vignette in &script.vignettes {
        lines.push(format!(
            "\nVignette {}: {}",
            vignette.scene_number, vignette.scene_title
        ));
        lines.push(format!("  Video Segments: {}", vignette.total_video_segments));
        lines.push(format!("  VO Segments: {}", vignette.total_vo_segments));
        lines.push(format!("  Total Segments: {}", vignette.segments.len()));
        if !vignette.characters.is_empty() {
            lines.push(format!("  Characters: {}", vignette.characters.join(", ")));
        }
        if !vignette.locations.is_empty() {
            lines.push(format!("  Locations: {}", vignette.locations.join(", ")));
        }
    }
    lines.join("\n")
}
