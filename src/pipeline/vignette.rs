//! Output tree for vignette scripts.
use super::reports::{vignette_index, vignette_report, MASTER_INDEX_FILE, VIGNETTE_REPORT_FILE};
use super::{ProcessOptions, RunStamp, ScriptSummary};
use crate::prompts::segment_prompt;
use crate::staging::Staging;
use crate::vignette::{character_appearances, parse_vignettes, Appearance, SegmentKind};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

const LAYOUT: [&str; 7] = [
    "00_Statistics",
    "01_Vignettes",
    "02_Video_Segments",
    "03_VO_Segments",
    "04_Text_Overlays",
    "05_Characters",
    "06_Veo3_Prompts",
];

#[derive(Serialize)]
struct CharacterSheet<'a> {
    characters: &'a [String],
    character_appearances: BTreeMap<String, Vec<Appearance>>,
}

pub(super) fn write_vignettes(
    staging: &Staging,
    slug: &str,
    content: &str,
    options: &ProcessOptions<'_>,
    stamp: &RunStamp,
) -> Result<ScriptSummary> {
    info!("phase 1: vignette analysis and structure");
    let script = parse_vignettes(content, options.vignette_rules);
    for dir in LAYOUT {
        staging.create_dir(dir)?;
    }
    staging.write_json("00_Statistics/vignette_analysis.json", &script.stats)?;

    for vignette in &script.vignettes {
        let n = vignette.scene_number;
        staging.write_json(
            &format!("01_Vignettes/Vignette_{n}/vignette_{n}_data.json"),
            vignette,
        )?;
        for segment in &vignette.segments {
            let number = segment.padded_number();
            match segment.kind {
                SegmentKind::Video => {
                    let stem = format!("{slug}_vignette{n}_video{number}");
                    staging.write_json(&format!("02_Video_Segments/{stem}.json"), segment)?;
                    staging.write_json(
                        &format!("06_Veo3_Prompts/{stem}_veo3.json"),
                        &segment_prompt(vignette, segment),
                    )?;
                }
                SegmentKind::Vo => staging.write_json(
                    &format!("03_VO_Segments/{slug}_vignette{n}_vo{number}.json"),
                    segment,
                )?,
                SegmentKind::TextOverlay => staging.write_json(
                    &format!("04_Text_Overlays/{slug}_vignette{n}_text{number}.json"),
                    segment,
                )?,
            }
        }
    }

    if !script.stats.characters.is_empty() {
        staging.write_json(
            "05_Characters/all_characters.json",
            &CharacterSheet {
                characters: &script.stats.characters,
                character_appearances: character_appearances(&script.vignettes),
            },
        )?;
    }

    staging.write_json(
        MASTER_INDEX_FILE,
        &vignette_index(slug, &stamp.iso, &script),
    )?;
    staging.write_text(
        VIGNETTE_REPORT_FILE,
        &vignette_report(&script, &stamp.display),
    )?;

    Ok(ScriptSummary {
        units: script.stats.total_scenes,
        shots: script.stats.total_video_segments,
        agent_failures: 0,
    })
}
