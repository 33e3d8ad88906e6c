//! Project scaffolding for `filmcrew init`.
use crate::config::{default_config, write_config};
use crate::crew::Department;
use crate::paths::ProjectPaths;
use crate::templates::agent_prompt;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Create the project layout under `root`; returns the files written.
///
/// Existing agent prompts are kept unless `force` is set, so local edits
/// survive a re-init.
pub fn init_project(root: &Path, force: bool) -> Result<Vec<PathBuf>> {
    let paths = ProjectPaths::new(root.to_path_buf());
    let config_path = paths.config_path();
    if config_path.is_file() && !force {
        return Err(anyhow!(
            "config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }
    let config = default_config();
    for dir in [
        paths.scripts_dir(&config),
        paths.output_dir(&config),
        paths.agents_dir(),
    ] {
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    }

    let mut written = Vec::new();
    for department in Department::ALL {
        let path = paths.agent_prompt_path(department);
        if write_project_file(&path, agent_prompt(department), force)? {
            written.push(path);
        }
    }
    write_config(paths.root(), &config)?;
    written.push(config_path);
    Ok(written)
}

fn write_project_file(path: &Path, contents: &str, force: bool) -> Result<bool> {
    if path.is_file() && !force {
        tracing::debug!(path = %path.display(), "keeping existing file");
        return Ok(false);
    }
    fs::write(path, contents.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config, CONFIG_FILE};

    #[test]
    fn init_creates_layout_and_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let written = init_project(dir.path(), false).unwrap();
        assert_eq!(written.len(), Department::ALL.len() + 1);
        assert!(dir.path().join("scripts").is_dir());
        assert!(dir.path().join("output").is_dir());
        assert_eq!(
            fs::read_to_string(dir.path().join("agents/camera_director.md")).unwrap(),
            agent_prompt(Department::CameraDirector)
        );
        assert_eq!(load_config(dir.path()).unwrap(), default_config());
    }

    #[test]
    fn existing_config_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        init_project(dir.path(), false).unwrap();
        let err = init_project(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("use --force"));

        let custom = dir.path().join("agents/music_director.md");
        fs::write(&custom, "my music prompt").unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{}").unwrap();
        let written = init_project(dir.path(), true).unwrap();
        assert_eq!(written.len(), Department::ALL.len() + 1);
        assert_eq!(
            fs::read_to_string(&custom).unwrap(),
            agent_prompt(Department::MusicDirector)
        );
    }

    #[test]
    fn agent_prompts_survive_a_config_only_reinit() {
        let dir = tempfile::tempdir().unwrap();
        init_project(dir.path(), false).unwrap();
        fs::remove_file(dir.path().join(CONFIG_FILE)).unwrap();
        let custom = dir.path().join("agents/sound_designer.md");
        fs::write(&custom, "mine").unwrap();
        let written = init_project(dir.path(), false).unwrap();
        assert_eq!(written, vec![dir.path().join(CONFIG_FILE)]);
        assert_eq!(fs::read_to_string(&custom).unwrap(), "mine");
    }
}
