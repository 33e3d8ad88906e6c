//! Exporters for video-generation platforms other than the native prompt.
//!
//! Every platform receives the same [`ExportShot`] and renders it in its own
//! dialect: plain text, a `/create` command or a JSON request body.
use crate::util::truncate_with_ellipsis;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

pub const COMPARISON_FILE: &str = "PLATFORM_COMPARISON.txt";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Veo3,
    Runway,
    Pika,
    Stability,
    Haiper,
}

/// What a platform accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformConfig {
    pub platform_name: &'static str,
    pub max_prompt_length: usize,
    pub supports_camera_motion: bool,
    pub supports_voice_over: bool,
    pub prompt_format: &'static str,
    /// Ordered `(key, value)` pairs as shown in the comparison report.
    pub special_requirements: Vec<(&'static str, String)>,
}

/// Platform-neutral description of one shot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportShot {
    pub shot_id: String,
    pub subject: String,
    pub context: String,
    pub location: String,
    pub action: String,
    pub camera_motion: String,
    /// Coarse camera keyword: `crane`, `tracking`, `zoom`, `handheld` or `static`.
    pub camera_type: String,
    pub mood: String,
    pub motion_amount: Option<String>,
}

impl ExportShot {
    /// Coarse camera keyword for a free-form movement description.
    pub fn camera_type_for(movement: &str) -> &'static str {
        let lower = movement.to_lowercase();
        if lower.contains("crane") {
            "crane"
        } else if lower.contains("dolly") || lower.contains("steadicam") || lower.contains("track")
        {
            "tracking"
        } else if lower.contains("zoom") || lower.contains("push in") {
            "zoom"
        } else if lower.contains("handheld") {
            "handheld"
        } else {
            "static"
        }
    }

    /// Motion strength hint on a 1-4 scale for the camera keyword.
    pub fn motion_amount_for(camera_type: &str) -> &'static str {
        match camera_type {
            "static" => "1",
            "zoom" => "2",
            "crane" | "tracking" => "3",
            _ => "4",
        }
    }
}

/// One rendered export, relative to the platform's export folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Veo3,
        Platform::Runway,
        Platform::Pika,
        Platform::Stability,
        Platform::Haiper,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Platform::Veo3 => "veo3",
            Platform::Runway => "runway",
            Platform::Pika => "pika",
            Platform::Stability => "stability",
            Platform::Haiper => "haiper",
        }
    }

    /// `<PLATFORM>_Exports`.
    pub fn export_dir(self) -> String {
        format!("{}_Exports", self.key().to_uppercase())
    }

    pub fn config(self) -> PlatformConfig {
        let requirements = |pairs: &[(&'static str, &str)]| {
            pairs
                .iter()
                .map(|(key, value)| (*key, value.to_string()))
                .collect::<Vec<_>>()
        };
        match self {
            Platform::Veo3 => PlatformConfig {
                platform_name: "Google Veo3",
                max_prompt_length: 500,
                supports_camera_motion: true,
                supports_voice_over: true,
                prompt_format: "natural",
                special_requirements: requirements(&[
                    ("style", "cinematic"),
                    ("duration", "3-5 seconds"),
                ]),
            },
            Platform::Runway => PlatformConfig {
                platform_name: "Runway ML Gen-2",
                max_prompt_length: 320,
                supports_camera_motion: true,
                supports_voice_over: false,
                prompt_format: "structured",
                special_requirements: requirements(&[
                    ("aspect_ratio", "16:9"),
                    ("duration", "4 seconds"),
                ]),
            },
            Platform::Pika => PlatformConfig {
                platform_name: "Pika Labs",
                max_prompt_length: 200,
                supports_camera_motion: true,
                supports_voice_over: false,
                prompt_format: "natural",
                special_requirements: requirements(&[("duration", "3 seconds"), ("fps", "24")]),
            },
            Platform::Stability => PlatformConfig {
                platform_name: "Stability AI Video",
                max_prompt_length: 400,
                supports_camera_motion: false,
                supports_voice_over: false,
                prompt_format: "structured",
                special_requirements: requirements(&[
                    ("style_strength", "0.8"),
                    ("motion_bucket", "127"),
                ]),
            },
            Platform::Haiper => PlatformConfig {
                platform_name: "Haiper AI",
                max_prompt_length: 300,
                supports_camera_motion: true,
                supports_voice_over: false,
                prompt_format: "natural",
                special_requirements: requirements(&[("duration", "2-4 seconds")]),
            },
        }
    }

    /// The platform's prompt text, clamped to its maximum length.
    pub fn format_prompt(self, shot: &ExportShot) -> String {
        let limit = self.config().max_prompt_length;
        let prompt = match self {
            Platform::Veo3 => veo3_prompt(shot),
            Platform::Runway => runway_prompt(shot),
            Platform::Pika => pika_prompt(shot),
            Platform::Stability => stability_description(shot),
            Platform::Haiper => haiper_prompt(shot),
        };
        truncate_with_ellipsis(&prompt, limit)
    }

    pub fn render(self, shot: &ExportShot) -> Result<ExportFile> {
        let prompt = self.format_prompt(shot);
        let id = &shot.shot_id;
        let (file_name, contents) = match self {
            Platform::Veo3 => (format!("{id}_veo3.txt"), prompt),
            Platform::Pika => (format!("{id}_pika.txt"), format!("/create {prompt}")),
            Platform::Haiper => (format!("{id}_haiper.txt"), prompt),
            Platform::Runway => {
                let body = json!({
                    "prompt": prompt,
                    "settings": {
                        "duration": 4,
                        "aspect_ratio": "16:9",
                        "motion_amount": shot.motion_amount.as_deref().unwrap_or("auto"),
                    },
                });
                (format!("{id}_runway.json"), to_json(&body)?)
            }
            Platform::Stability => {
                let mut request = json!({
                    "description": prompt,
                    "style": "cinematic, professional color grading",
                    "lighting": "natural lighting",
                    "quality": "high detail, 4k",
                });
                if !shot.mood.is_empty() {
                    request["atmosphere"] = json!(shot.mood);
                }
                let body = json!({
                    "prompt": request,
                    "parameters": {
                        "motion_bucket_id": 127,
                        "fps": 24,
                        "style_strength": 0.8,
                    },
                });
                (format!("{id}_stability.json"), to_json(&body)?)
            }
        };
        Ok(ExportFile {
            file_name,
            contents,
        })
    }
}

fn to_json(value: &serde_json::Value) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize export")
}

fn veo3_prompt(shot: &ExportShot) -> String {
    let mut parts = Vec::new();
    for (label, value) in [
        ("Subject", &shot.subject),
        ("Context", &shot.context),
        ("Action", &shot.action),
        ("Camera Motion", &shot.camera_motion),
    ] {
        if !value.is_empty() {
            parts.push(format!("{label}: {value}"));
        }
    }
    parts.push("Style: Cinematic, naturalistic cinematography".to_string());
    parts.join("\n")
}

fn runway_prompt(shot: &ExportShot) -> String {
    let mut parts: Vec<&str> = [shot.subject.as_str(), shot.action.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    parts.push("cinematic lighting");
    if !shot.camera_type.is_empty() {
        parts.push(match shot.camera_type.as_str() {
            "crane" => "aerial view rising",
            "tracking" => "smooth tracking shot",
            "static" => "locked off shot",
            "handheld" => "handheld camera movement",
            _ => "steady cam",
        });
    }
    parts.join(", ")
}

fn pika_prompt(shot: &ExportShot) -> String {
    let mut parts = Vec::new();
    if !shot.subject.is_empty() {
        parts.push(shot.subject.clone());
    }
    let motion = match shot.camera_type.as_str() {
        "crane" => "camera zoom out",
        "tracking" => "camera pan right",
        "zoom" => "camera zoom in",
        _ => "",
    };
    if !motion.is_empty() {
        parts.push(format!("-camera {motion}"));
    }
    if let Some(amount) = &shot.motion_amount {
        parts.push(format!("-motion {amount}"));
    }
    parts.push("-gs 16".to_string());
    parts.join(" ")
}

fn stability_description(shot: &ExportShot) -> String {
    let mut parts = Vec::new();
    if !shot.subject.is_empty() {
        parts.push(shot.subject.clone());
    }
    if !shot.location.is_empty() {
        parts.push(format!("in {}", shot.location));
    }
    if !shot.action.is_empty() {
        parts.push(shot.action.clone());
    }
    parts.join(", ")
}

fn haiper_prompt(shot: &ExportShot) -> String {
    let mut parts = Vec::new();
    if !shot.subject.is_empty() {
        parts.push(shot.subject.clone());
    }
    if !shot.location.is_empty() {
        parts.push(format!("Location: {}", shot.location));
    }
    if !shot.action.is_empty() {
        parts.push(format!("Action: {}", shot.action));
    }
    parts.push("Style: Cinematic, high quality".to_string());
    if !shot.camera_motion.is_empty() {
        parts.push(format!("Camera: {}", shot.camera_motion));
    }
    parts.join(" | ")
}

/// `PLATFORM_COMPARISON.txt` for the files written per platform.
pub fn comparison_report(files_per_platform: &BTreeMap<Platform, usize>) -> String {
    let rule = "=".repeat(60);
    let mut lines = vec![
        rule.clone(),
        "MULTI-PLATFORM EXPORT COMPARISON".to_string(),
        rule.clone(),
        String::new(),
    ];
    for (platform, count) in files_per_platform {
        let config = platform.config();
        let yes_no = |flag: bool| if flag { "Yes" } else { "No" };
        lines.push(format!("\n{}:", config.platform_name));
        lines.push("-".repeat(40));
        lines.push(format!("  Files Generated: {count}"));
        lines.push(format!("  Format: {}", config.prompt_format));
        lines.push(format!("  Max Prompt Length: {}", config.max_prompt_length));
        lines.push(format!(
            "  Camera Motion: {}",
            yes_no(config.supports_camera_motion)
        ));
        lines.push(format!("  Voice Over: {}", yes_no(config.supports_voice_over)));
        if !config.special_requirements.is_empty() {
            lines.push("  Special Requirements:".to_string());
            for (key, value) in &config.special_requirements {
                lines.push(format!("    - {key}: {value}"));
            }
        }
    }
    lines.push(format!("\n{rule}"));
    lines.push("Export Summary:".to_string());
    lines.push(format!("  Total Platforms: {}", files_per_platform.len()));
    lines.push(format!(
        "  Total Files: {}",
        files_per_platform.values().sum::<usize>()
    ));
    lines.push(rule);
    let mut report = lines.join("\n");
    report.push('\n');
    report
}

/// One line per platform for `filmcrew platforms`.
pub fn platform_table() -> String {
    let mut out = String::new();
    for platform in Platform::ALL {
        let config = platform.config();
        out.push_str(&format!(
            "{:<10} {:<20} max {:>3} chars  format={:<10} camera={} voice_over={}\n",
            platform.key(),
            config.platform_name,
            config.max_prompt_length,
            config.prompt_format,
            config.supports_camera_motion,
            config.supports_voice_over,
        ));
    }
    out
}
