//! Script processing: one input file in, one published output folder out.
//!
//! Every artifact is written into a staging directory first and the folder is
//! published with a single rename once the run succeeded. Traditional scripts
//! go through all five phases (structure and crew, enhanced prompts, natural
//! prompts, summaries, platform exports); vignette scripts stop after their
//! structure.
mod batch;
mod reports;
mod traditional;
mod vignette;

pub use batch::{collect_scripts, run_batch, BatchOutcome, ScriptResult, BATCH_REPORT_PREFIX};

use crate::crew::CrewBackend;
use crate::export::Platform;
use crate::format::{FormatChoice, ScriptFormat};
use crate::prompts::CharacterRegistry;
use crate::reader::{read_script, validate_input};
use crate::staging::{is_empty_dir, unique_destination, Staging};
use crate::util::{iso_timestamp, timestamp_slug};
use crate::vignette::VignetteRules;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::info;

/// Which prompt phases run for traditional scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phases {
    pub enhanced: bool,
    pub natural: bool,
}

impl Default for Phases {
    fn default() -> Self {
        Self {
            enhanced: true,
            natural: true,
        }
    }
}

impl Phases {
    pub fn from_flags(enhanced_only: bool, natural_only: bool) -> Self {
        match (enhanced_only, natural_only) {
            (true, false) => Self {
                enhanced: true,
                natural: false,
            },
            (false, true) => Self {
                enhanced: false,
                natural: true,
            },
            _ => Self::default(),
        }
    }
}

/// Everything a run needs besides the script itself.
pub struct ProcessOptions<'a> {
    /// Receives one timestamped folder per script.
    pub output_root: PathBuf,
    /// Publish here instead; must be absent or empty.
    pub output_dir: Option<PathBuf>,
    pub format: FormatChoice,
    pub phases: Phases,
    pub platforms: Vec<Platform>,
    pub backend: &'a dyn CrewBackend,
    pub characters: &'a CharacterRegistry,
    pub vignette_rules: &'a VignetteRules,
}

/// What one processed script produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub output_dir: PathBuf,
    pub format: ScriptFormat,
    /// Scenes, or vignettes for vignette scripts.
    pub units: usize,
    /// Shots, or video segments for vignette scripts.
    pub shots: usize,
    pub agent_failures: usize,
}

pub(crate) struct ScriptSummary {
    units: usize,
    shots: usize,
    agent_failures: usize,
}

/// One clock reading rendered for folder names, JSON and reports.
pub(crate) struct RunStamp {
    slug: String,
    iso: String,
    display: String,
}

impl RunStamp {
    fn new(now: &DateTime<Local>) -> Self {
        Self {
            slug: timestamp_slug(now),
            iso: iso_timestamp(now),
            display: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// File stem with spaces replaced, used in folder and artifact names.
pub fn script_slug(script: &Path) -> String {
    script
        .file_stem()
        .map(|stem| stem.to_string_lossy().replace(' ', "_"))
        .unwrap_or_else(|| "script".to_string())
}

/// `<slug>_<YYYYmmdd_HHMMSS>`.
pub fn output_folder_name(script: &Path, timestamp: &str) -> String {
    format!("{}_{timestamp}", script_slug(script))
}

pub fn process_script(script: &Path, options: &ProcessOptions<'_>) -> Result<ProcessOutcome> {
    validate_input(script)?;
    if let Some(dir) = &options.output_dir {
        if dir.exists() && !is_empty_dir(dir)? {
            return Err(anyhow!(
                "output directory {} already exists and is not empty",
                dir.display()
            ));
        }
    }
    let content = read_script(script)?;
    if content.trim().is_empty() {
        return Err(anyhow!("no text found in {}", script.display()));
    }
    let format = options.format.resolve(script, &content);
    info!(script = %script.display(), format = %format, "processing script");

    let stamp = RunStamp::new(&Local::now());
    let slug = script_slug(script);
    let staging_parent = match &options.output_dir {
        Some(dir) => parent_or_cwd(dir).to_path_buf(),
        None => options.output_root.clone(),
    };
    let staging = Staging::new_in(&staging_parent)?;
    let summary = match format {
        ScriptFormat::Traditional => {
            traditional::write_traditional(&staging, &slug, &content, options, &stamp)?
        }
        ScriptFormat::Vignette => {
            vignette::write_vignettes(&staging, &slug, &content, options, &stamp)?
        }
    };

    let dest = match &options.output_dir {
        Some(dir) => dir.clone(),
        None => unique_destination(
            &options.output_root,
            &output_folder_name(script, &stamp.slug),
        ),
    };
    let output_dir = staging.publish(&dest)?;
    info!(
        output = %output_dir.display(),
        units = summary.units,
        shots = summary.shots,
        "processing complete"
    );
    Ok(ProcessOutcome {
        output_dir,
        format,
        units: summary.units,
        shots: summary.shots,
        agent_failures: summary.agent_failures,
    })
}

fn parent_or_cwd(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
