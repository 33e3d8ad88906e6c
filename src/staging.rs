//! Staged output folders.
//!
//! A run writes its whole tree into a hidden temporary directory next to the
//! final destination and publishes it with a single rename, so a failed run
//! never leaves a half-written output folder behind.
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const STAGING_PREFIX: &str = ".filmcrew-staging";

#[derive(Debug)]
pub struct Staging {
    dir: TempDir,
}

impl Staging {
    /// Create a staging directory inside `parent` (created if missing).
    pub fn new_in(parent: &Path) -> Result<Self> {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(parent)
            .with_context(|| format!("create staging dir in {}", parent.display()))?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create an empty folder so fixed layouts exist even with nothing in them.
    pub fn create_dir(&self, rel_path: &str) -> Result<()> {
        let path = self.root().join(rel_path);
        fs::create_dir_all(&path).with_context(|| format!("create {}", path.display()))
    }

    pub fn write_bytes(&self, rel_path: &str, bytes: &[u8]) -> Result<()> {
        let staging_path = self.root().join(rel_path);
        if let Some(parent) = staging_path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&staging_path, bytes)
            .with_context(|| format!("write {}", staging_path.display()))?;
        Ok(())
    }

    pub fn write_text(&self, rel_path: &str, text: &str) -> Result<()> {
        self.write_bytes(rel_path, text.as_bytes())
    }

    pub fn write_json<T: serde::Serialize>(&self, rel_path: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)
            .with_context(|| format!("serialize {rel_path}"))?;
        self.write_bytes(rel_path, &bytes)
    }

    /// Move the staged tree to `dest`. An existing `dest` must be an empty
    /// directory; it is replaced.
    pub fn publish(self, dest: &Path) -> Result<PathBuf> {
        if dest.exists() {
            if !is_empty_dir(dest)? {
                return Err(anyhow!(
                    "output directory {} already exists and is not empty",
                    dest.display()
                ));
            }
            fs::remove_dir(dest).with_context(|| format!("replace {}", dest.display()))?;
        }
        fs::rename(self.dir.path(), dest).with_context(|| {
            format!(
                "publish {} to {}",
                self.dir.path().display(),
                dest.display()
            )
        })?;
        tracing::debug!(dest = %dest.display(), "published output folder");
        Ok(dest.to_path_buf())
    }
}

/// Pick `parent/name`, or `name_2`, `name_3`... when taken.
pub fn unique_destination(parent: &Path, name: &str) -> PathBuf {
    let first = parent.join(name);
    if !first.exists() {
        return first;
    }
    let mut n = 2usize;
    loop {
        let candidate = parent.join(format!("{name}_{n}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

pub fn is_empty_dir(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    let mut entries = fs::read_dir(path).with_context(|| format!("read {}", path.display()))?;
    Ok(entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_moves_the_staged_tree() {
        let root = tempfile::tempdir().unwrap();
        let staging = Staging::new_in(root.path()).unwrap();
        staging.write_text("01_Scenes/Scene_1/a.txt", "hi").unwrap();
        staging
            .write_json("MASTER_INDEX.json", &serde_json::json!({"project": "x"}))
            .unwrap();
        let staged = staging.root().to_path_buf();

        let dest = root.path().join("script_20240101_000000");
        let published = staging.publish(&dest).unwrap();
        assert_eq!(published, dest);
        assert!(!staged.exists());
        assert_eq!(
            fs::read_to_string(dest.join("01_Scenes/Scene_1/a.txt")).unwrap(),
            "hi"
        );
        let names: Vec<_> = fs::read_dir(root.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn publish_refuses_non_empty_destination() {
        let root = tempfile::tempdir().unwrap();
        let dest = root.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("keep.txt"), "x").unwrap();
        let staging = Staging::new_in(root.path()).unwrap();
        let err = staging.publish(&dest).unwrap_err();
        assert!(err.to_string().contains("not empty"));
        assert!(dest.join("keep.txt").is_file());
    }

    #[test]
    fn empty_destination_is_replaced() {
        let root = tempfile::tempdir().unwrap();
        let dest = root.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        let staging = Staging::new_in(root.path()).unwrap();
        staging.write_text("a.txt", "a").unwrap();
        staging.publish(&dest).unwrap();
        assert!(dest.join("a.txt").is_file());
    }

    #[test]
    fn collisions_get_numeric_suffixes() {
        let root = tempfile::tempdir().unwrap();
        assert_eq!(unique_destination(root.path(), "s"), root.path().join("s"));
        fs::create_dir(root.path().join("s")).unwrap();
        assert_eq!(unique_destination(root.path(), "s"), root.path().join("s_2"));
        fs::create_dir(root.path().join("s_2")).unwrap();
        assert_eq!(unique_destination(root.path(), "s"), root.path().join("s_3"));
    }
}
