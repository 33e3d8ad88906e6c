//! Script format detection.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Number of leading characters inspected for vignette markers.
const DETECTION_WINDOW: usize = 1000;

/// Layout of a screenplay document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptFormat {
    /// Sluglines, action, character cues and dialogue.
    Traditional,
    /// `Video:` / `VO:` blocks, typically for short branded pieces.
    Vignette,
}

impl fmt::Display for ScriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptFormat::Traditional => f.write_str("traditional"),
            ScriptFormat::Vignette => f.write_str("vignette"),
        }
    }
}

/// Format selection as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatChoice {
    #[default]
    Auto,
    Traditional,
    Vignette,
}

impl FormatChoice {
    pub fn resolve(self, path: &Path, content: &str) -> ScriptFormat {
        match self {
            FormatChoice::Auto => detect_format(path, content),
            FormatChoice::Traditional => ScriptFormat::Traditional,
            FormatChoice::Vignette => ScriptFormat::Vignette,
        }
    }
}

pub fn detect_format(path: &Path, content: &str) -> ScriptFormat {
    let head: String = content
        .chars()
        .take(DETECTION_WINDOW)
        .collect::<String>()
        .to_lowercase();
    if head.contains("video:") || head.contains("vo:") {
        return ScriptFormat::Vignette;
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if name.contains("vignette") {
        return ScriptFormat::Vignette;
    }
    ScriptFormat::Traditional
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_in_the_opening_select_vignette() {
        let content = "Vignette #1: Morning\nVideo: A farmhouse at dawn.\n";
        assert_eq!(
            detect_format(Path::new("spot.txt"), content),
            ScriptFormat::Vignette
        );
    }

    #[test]
    fn markers_past_the_window_are_ignored() {
        let content = format!("{}\nVideo: late marker", "x".repeat(1200));
        assert_eq!(
            detect_format(Path::new("feature.txt"), &content),
            ScriptFormat::Traditional
        );
    }

    #[test]
    fn file_name_can_mark_a_vignette() {
        assert_eq!(
            detect_format(Path::new("Health VIGNETTES draft.docx"), "INT. OFFICE - DAY"),
            ScriptFormat::Vignette
        );
    }

    #[test]
    fn forced_choice_overrides_detection() {
        let content = "VO: hello there, this is a narration line";
        assert_eq!(
            FormatChoice::Traditional.resolve(Path::new("a.txt"), content),
            ScriptFormat::Traditional
        );
    }
}
