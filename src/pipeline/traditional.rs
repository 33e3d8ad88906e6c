//! Output tree for traditional screenplays.
use super::reports::{analysis_report, master_index, ANALYSIS_REPORT_FILE, MASTER_INDEX_FILE};
use super::{Phases, ProcessOptions, RunStamp, ScriptSummary};
use crate::crew::{Crew, Department, ShotNotes, AGENT_LOGS_DIR, EXECUTION_REPORT_FILE};
use crate::export::{comparison_report, ExportShot, COMPARISON_FILE};
use crate::prompts::{
    enhanced_master_file, enhanced_prompt, natural_master_file, natural_prompt, shot_file_stem,
    shot_prompt, NaturalPrompt, PromptSource, ENHANCED_DIR, ENHANCED_MASTER_FILE, NATURAL_DIR,
    NATURAL_MASTER_FILE,
};
use crate::screenplay::{parse_screenplay, Scene, Screenplay, Shot, Transition, VoiceOver};
use crate::staging::Staging;
use crate::summary::{master_summary, render_overview, summarize_scene, SUMMARIES_DIR};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

const LAYOUT: [&str; 6] = [
    "00_Statistics",
    "01_Scenes",
    "02_Shots",
    "03_VoiceOvers",
    "04_Transitions",
    "05_Veo3_Prompts",
];

#[derive(Serialize)]
struct SceneVoiceOver<'a> {
    scene: u32,
    #[serde(flatten)]
    voice_over: &'a VoiceOver,
}

#[derive(Serialize)]
struct SceneTransition<'a> {
    scene: u32,
    position: &'static str,
    #[serde(flatten)]
    transition: &'a Transition,
}

/// A shot, its scene and what the crew said about it.
struct CoveredShot<'a> {
    scene: &'a Scene,
    shot: &'a Shot,
    notes: ShotNotes,
    stem: String,
}

impl CoveredShot<'_> {
    fn source(&self) -> PromptSource<'_> {
        PromptSource::new(self.scene, self.shot, &self.notes)
    }
}

pub(super) fn write_traditional(
    staging: &Staging,
    slug: &str,
    content: &str,
    options: &ProcessOptions<'_>,
    stamp: &RunStamp,
) -> Result<ScriptSummary> {
    info!("phase 1: script analysis and structure");
    let screenplay = parse_screenplay(content);
    write_structure(staging, slug, &screenplay)?;

    let mut crew = Crew::new(options.backend);
    info!(
        backend = crew.backend_label(),
        shots = screenplay.stats.total_shots,
        "consulting the crew"
    );
    let covered: Vec<CoveredShot<'_>> = screenplay
        .shots()
        .map(|(scene, shot)| CoveredShot {
            scene,
            shot,
            notes: crew.consult_shot(scene, shot),
            stem: shot_file_stem(slug, shot),
        })
        .collect();
    write_department_notes(staging, &covered)?;

    let log = crew.into_log();
    if log.is_empty() {
        tracing::debug!("no shots found; the crew was not consulted");
    }
    for (rel_path, entry) in log.log_files() {
        staging.write_json(&rel_path, entry)?;
    }
    staging.write_json(
        &format!("{AGENT_LOGS_DIR}/{EXECUTION_REPORT_FILE}"),
        &log.report(&stamp.iso),
    )?;
    if log.failures() > 0 {
        tracing::warn!(
            failures = log.failures(),
            calls = log.len(),
            "some agent calls failed; see the execution report"
        );
    }

    staging.write_json(
        MASTER_INDEX_FILE,
        &master_index(slug, &stamp.iso, &screenplay),
    )?;
    staging.write_text(
        ANALYSIS_REPORT_FILE,
        &analysis_report(&screenplay, &stamp.display),
    )?;

    write_prompt_phases(staging, &covered, options)?;

    info!("phase 4: scene summaries");
    write_summaries(staging, slug, &screenplay, stamp)?;

    if !options.platforms.is_empty() {
        info!(platforms = options.platforms.len(), "phase 5: platform exports");
        write_exports(staging, &covered, options)?;
    }

    Ok(ScriptSummary {
        units: screenplay.stats.total_scenes,
        shots: screenplay.stats.total_shots,
        agent_failures: log.failures(),
    })
}

fn write_structure(staging: &Staging, slug: &str, screenplay: &Screenplay) -> Result<()> {
    for dir in LAYOUT {
        staging.create_dir(dir)?;
    }
    staging.write_json("00_Statistics/analysis.json", &screenplay.stats)?;

    let mut voice_overs = Vec::new();
    let mut transitions = Vec::new();
    for scene in &screenplay.scenes {
        let n = scene.scene_number;
        staging.write_json(&format!("01_Scenes/Scene_{n}/scene_{n}_data.json"), scene)?;
        for shot in &scene.shots {
            let stem = shot_file_stem(slug, shot);
            staging.write_json(&format!("02_Shots/{stem}.json"), shot)?;
            staging.write_json(
                &format!("05_Veo3_Prompts/{stem}_veo3.json"),
                &shot_prompt(scene, shot),
            )?;
        }
        voice_overs.extend(scene.voice_overs.iter().map(|voice_over| SceneVoiceOver {
            scene: n,
            voice_over,
        }));
        let sides = [
            ("in", scene.transition_in.as_ref()),
            ("out", scene.transition_out.as_ref()),
        ];
        transitions.extend(sides.into_iter().filter_map(|(position, transition)| {
            transition.map(|transition| SceneTransition {
                scene: n,
                position,
                transition,
            })
        }));
    }
    if !voice_overs.is_empty() {
        staging.write_json("03_VoiceOvers/all_voiceovers.json", &voice_overs)?;
    }
    if !transitions.is_empty() {
        staging.write_json("04_Transitions/all_transitions.json", &transitions)?;
    }
    Ok(())
}

fn write_department_notes(staging: &Staging, covered: &[CoveredShot<'_>]) -> Result<()> {
    for department in Department::ALL {
        let Some(folder) = department.output_folder() else {
            continue;
        };
        staging.create_dir(folder)?;
        for entry in covered {
            staging.write_json(
                &format!("{folder}/{}.json", entry.stem),
                &entry.notes.department_json(department)?,
            )?;
        }
    }
    Ok(())
}

fn write_prompt_phases(
    staging: &Staging,
    covered: &[CoveredShot<'_>],
    options: &ProcessOptions<'_>,
) -> Result<()> {
    let Phases { enhanced, natural } = options.phases;
    if enhanced {
        info!("phase 2: enhanced prompts");
        staging.create_dir(ENHANCED_DIR)?;
        let mut entries = Vec::with_capacity(covered.len());
        for entry in covered {
            let text = enhanced_prompt(&entry.source(), options.characters).to_text();
            staging.write_text(
                &format!("{ENHANCED_DIR}/{}_enhanced.txt", entry.stem),
                &text,
            )?;
            entries.push((entry.stem.clone(), text));
        }
        staging.write_text(
            &format!("{ENHANCED_DIR}/{ENHANCED_MASTER_FILE}"),
            &enhanced_master_file(&entries),
        )?;
    }
    if natural {
        info!("phase 3: natural language prompts");
        staging.create_dir(NATURAL_DIR)?;
        let mut entries = Vec::with_capacity(covered.len());
        for entry in covered {
            let text = natural_prompt(&entry.source()).to_text();
            staging.write_text(&format!("{NATURAL_DIR}/{}_natural.txt", entry.stem), &text)?;
            entries.push((entry.stem.clone(), text));
        }
        staging.write_text(
            &format!("{NATURAL_DIR}/{NATURAL_MASTER_FILE}"),
            &natural_master_file(&entries),
        )?;
    }
    Ok(())
}

fn write_summaries(
    staging: &Staging,
    slug: &str,
    screenplay: &Screenplay,
    stamp: &RunStamp,
) -> Result<()> {
    let summaries: Vec<_> = screenplay.scenes.iter().map(summarize_scene).collect();
    for summary in &summaries {
        staging.write_json(
            &format!(
                "{SUMMARIES_DIR}/{slug}_scene{}_summary.json",
                summary.scene_number
            ),
            summary,
        )?;
    }
    let master = master_summary(slug, &summaries, &stamp.iso);
    staging.write_json(
        &format!("{SUMMARIES_DIR}/{slug}_MASTER_SUMMARY.json"),
        &master,
    )?;
    staging.write_text(
        &format!("{SUMMARIES_DIR}/{slug}_OVERVIEW.txt"),
        &render_overview(&master),
    )
}

fn export_shot(entry: &CoveredShot<'_>, prompt: &NaturalPrompt) -> ExportShot {
    let source = entry.source();
    let camera_type = ExportShot::camera_type_for(source.camera_movement());
    ExportShot {
        shot_id: entry.stem.clone(),
        subject: prompt.subject.clone(),
        context: prompt.context.clone(),
        location: source.location(),
        action: prompt.action.clone(),
        camera_motion: prompt.camera_motion.clone(),
        camera_type: camera_type.to_string(),
        mood: source.mood().to_string(),
        motion_amount: Some(ExportShot::motion_amount_for(camera_type).to_string()),
    }
}

fn write_exports(
    staging: &Staging,
    covered: &[CoveredShot<'_>],
    options: &ProcessOptions<'_>,
) -> Result<()> {
    let shots: Vec<ExportShot> = covered
        .iter()
        .map(|entry| export_shot(entry, &natural_prompt(&entry.source())))
        .collect();
    let mut files_per_platform = BTreeMap::new();
    for &platform in &options.platforms {
        let dir = platform.export_dir();
        staging.create_dir(&dir)?;
        for shot in &shots {
            let file = platform.render(shot)?;
            staging.write_text(&format!("{dir}/{}", file.file_name), &file.contents)?;
        }
        tracing::debug!(platform = platform.key(), files = shots.len(), "exported");
        files_per_platform.insert(platform, shots.len());
    }
    staging.write_text(COMPARISON_FILE, &comparison_report(&files_per_platform))
}
