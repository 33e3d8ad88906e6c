//! Project configuration.
//!
//! `filmcrew.json` lives in the project root. Every field except
//! `schema_version` has a default so a minimal config stays short, and the
//! whole file is validated on load so mistakes surface before any script is
//! read.
use crate::export::Platform;
use crate::lm::parse_lm_command;
use crate::paths::ProjectPaths;
use crate::prompts::{CharacterProfile, CharacterRegistry};
use crate::vignette::VignetteRules;
use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Component, Path};

pub const CONFIG_FILE: &str = "filmcrew.json";
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Which crew answers the department questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Rule-based notes derived from the script; needs no external tools.
    #[default]
    Heuristic,
    /// One external LM call per department per shot.
    Lm,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CharacterConfig {
    pub profiles: BTreeMap<String, CharacterProfile>,
    /// Alternate spelling -> profile name.
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilmCrewConfig {
    pub schema_version: u32,
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lm_command: Option<String>,
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub characters: CharacterConfig,
    #[serde(default)]
    pub vignette: VignetteRules,
}

fn default_scripts_dir() -> String {
    "scripts".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_platforms() -> Vec<Platform> {
    vec![Platform::Veo3, Platform::Runway, Platform::Pika]
}

/// Build the config written by `filmcrew init`.
pub fn default_config() -> FilmCrewConfig {
    FilmCrewConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        scripts_dir: default_scripts_dir(),
        output_dir: default_output_dir(),
        backend: BackendKind::default(),
        lm_command: None,
        platforms: default_platforms(),
        characters: CharacterConfig::default(),
        vignette: VignetteRules::default(),
    }
}

/// Load and validate `filmcrew.json`.
pub fn load_config(project_root: &Path) -> Result<FilmCrewConfig> {
    let path = ProjectPaths::new(project_root.to_path_buf()).config_path();
    let bytes = fs::read(&path).with_context(|| format!("read config {}", path.display()))?;
    let config: FilmCrewConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config {}", path.display()))?;
    validate_config(&config).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Load the config when present, else fall back to defaults.
pub fn load_config_or_default(project_root: &Path) -> Result<FilmCrewConfig> {
    let path = ProjectPaths::new(project_root.to_path_buf()).config_path();
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no config; using defaults");
        return Ok(default_config());
    }
    load_config(project_root)
}

pub fn write_config(project_root: &Path, config: &FilmCrewConfig) -> Result<()> {
    let path = ProjectPaths::new(project_root.to_path_buf()).config_path();
    let mut text = serde_json::to_string_pretty(config).context("serialize config")?;
    text.push('\n');
    fs::write(&path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn validate_config(config: &FilmCrewConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {} (expected {CONFIG_SCHEMA_VERSION})",
            config.schema_version
        ));
    }
    validate_relative_dir(&config.scripts_dir, "scripts_dir")?;
    validate_relative_dir(&config.output_dir, "output_dir")?;
    let mut seen = BTreeSet::new();
    for platform in &config.platforms {
        if !seen.insert(platform) {
            return Err(anyhow!("platform {} listed twice", platform.key()));
        }
    }
    if let Some(raw) = config.lm_command.as_deref() {
        parse_lm_command(raw).context("lm_command")?;
    }
    character_registry(config)?;
    Ok(())
}

/// Character profiles and aliases as a lookup registry.
pub fn character_registry(config: &FilmCrewConfig) -> Result<CharacterRegistry> {
    CharacterRegistry::new(
        config.characters.profiles.clone(),
        config.characters.aliases.clone(),
    )
}

fn validate_relative_dir(rel: &str, label: &str) -> Result<()> {
    if rel.trim().is_empty() {
        return Err(anyhow!("{label} must be non-empty"));
    }
    let path = Path::new(rel);
    if path.is_absolute() || path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(anyhow!(
            "{label} must be a relative path without '..' (got {rel:?})"
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
