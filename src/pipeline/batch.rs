//! Batch processing of a scripts folder.
use super::{process_script, ProcessOptions};
use crate::reader::{is_supported, SUPPORTED_FORMATS};
use crate::util::timestamp_slug;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const BATCH_REPORT_PREFIX: &str = "batch_report_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptResult {
    Published(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Every script attempted, in processing order.
    pub results: Vec<(PathBuf, ScriptResult)>,
    pub report_path: PathBuf,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, result)| matches!(result, ScriptResult::Published(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// Supported scripts directly inside `dir`, sorted by file name.
pub fn collect_scripts(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(anyhow!("scripts directory not found: {}", dir.display()));
    }
    let mut scripts = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry.with_context(|| format!("read {}", dir.display()))?.path();
        if path.is_file() && is_supported(&path) {
            scripts.push(path);
        }
    }
    scripts.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(scripts)
}

/// Process every script in `scripts_dir`; a failing script does not stop the
/// batch. The report lands in the output root.
pub fn run_batch(scripts_dir: &Path, options: &ProcessOptions<'_>) -> Result<BatchOutcome> {
    let scripts = collect_scripts(scripts_dir)?;
    if scripts.is_empty() {
        return Err(anyhow!(
            "no script files found in {} (supported formats: {})",
            scripts_dir.display(),
            SUPPORTED_FORMATS.join(", ")
        ));
    }
    info!(count = scripts.len(), dir = %scripts_dir.display(), "batch started");

    let total = scripts.len();
    let mut results = Vec::with_capacity(total);
    for (idx, script) in scripts.into_iter().enumerate() {
        info!(script = %script.display(), "[{}/{total}] processing", idx + 1);
        let result = match process_script(&script, options) {
            Ok(outcome) => ScriptResult::Published(outcome.output_dir),
            Err(err) => {
                error!(script = %script.display(), error = %format!("{err:#}"), "script failed");
                ScriptResult::Failed(format!("{err:#}"))
            }
        };
        results.push((script, result));
    }

    let now = Local::now();
    fs::create_dir_all(&options.output_root)
        .with_context(|| format!("create {}", options.output_root.display()))?;
    let report_path = options
        .output_root
        .join(format!("{BATCH_REPORT_PREFIX}{}.txt", timestamp_slug(&now)));
    let date = now.format("%Y-%m-%d %H:%M:%S").to_string();
    fs::write(&report_path, render_report(&results, &date))
        .with_context(|| format!("write {}", report_path.display()))?;

    let outcome = BatchOutcome {
        results,
        report_path,
    };
    info!(
        succeeded = outcome.succeeded(),
        failed = outcome.failed(),
        "batch complete"
    );
    Ok(outcome)
}

fn render_report(results: &[(PathBuf, ScriptResult)], date: &str) -> String {
    let total = results.len();
    let succeeded = results
        .iter()
        .filter(|(_, result)| matches!(result, ScriptResult::Published(_)))
        .count();
    let rate = if total == 0 {
        0.0
    } else {
        succeeded as f64 * 100.0 / total as f64
    };
    let mut out = String::new();
    out.push_str("Film Crew - Batch Processing Report\n");
    out.push_str(&"=".repeat(60));
    out.push('\n');
    out.push_str(&format!("Date: {date}\n"));
    out.push_str(&format!("Total Scripts: {total}\n"));
    out.push_str(&format!("Successful: {succeeded}\n"));
    out.push_str(&format!("Failed: {}\n", total - succeeded));
    out.push_str(&format!("Success Rate: {rate:.1}%\n"));
    out.push_str("\nProcessed Files:\n");
    for (script, result) in results {
        let name = script
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match result {
            ScriptResult::Published(dir) => {
                let folder = dir
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                out.push_str(&format!("  - {name} -> {folder}\n"));
            }
            ScriptResult::Failed(reason) => {
                out.push_str(&format!("  - {name} FAILED: {reason}\n"));
            }
        }
    }
    out
}
