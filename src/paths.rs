//! Typed paths into a film-crew project.
use crate::config::{FilmCrewConfig, CONFIG_FILE};
use crate::crew::Department;
use std::path::{Path, PathBuf};

pub const AGENTS_DIR: &str = "agents";

/// Locates the config, scripts, output and agent prompts of one project.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Return the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the `filmcrew.json` path.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Return the directory holding scripts to process.
    pub fn scripts_dir(&self, config: &FilmCrewConfig) -> PathBuf {
        self.root.join(&config.scripts_dir)
    }

    /// Return the directory that receives one folder per processed script.
    pub fn output_dir(&self, config: &FilmCrewConfig) -> PathBuf {
        self.root.join(&config.output_dir)
    }

    /// Return the `agents/` directory with per-department prompt overrides.
    pub fn agents_dir(&self) -> PathBuf {
        self.root.join(AGENTS_DIR)
    }

    pub fn agent_prompt_path(&self, department: Department) -> PathBuf {
        self.agents_dir().join(department.prompt_file_name())
    }
}
