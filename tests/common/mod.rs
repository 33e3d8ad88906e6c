//! Shared test infrastructure for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn fixture_script(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("scripts")
        .join(name)
}

/// A scratch project driven through the compiled `filmcrew` binary.
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Run `filmcrew init` in a fresh temp directory.
    pub fn init() -> Self {
        let project = Self {
            dir: TempDir::new().expect("create temp project"),
        };
        let output = project.run(&["init", "--project"], &[project.root()]);
        assert!(
            output.status.success(),
            "init failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.root().join("scripts")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("output")
    }

    /// Copy a fixture script into `scripts/` and return its new path.
    pub fn add_script(&self, name: &str) -> PathBuf {
        let dest = self.scripts_dir().join(name);
        fs::copy(fixture_script(name), &dest).expect("copy fixture script");
        dest
    }

    pub fn write_script(&self, name: &str, contents: &str) -> PathBuf {
        let dest = self.scripts_dir().join(name);
        fs::write(&dest, contents).expect("write script");
        dest
    }

    /// Run the binary with `args` followed by `paths`.
    pub fn run(&self, args: &[&str], paths: &[&Path]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_filmcrew"))
            .args(args)
            .args(paths)
            .current_dir(self.root())
            .env_remove("FILMCREW_LM_COMMAND")
            .env_remove("FILMCREW_LOG")
            .output()
            .expect("run filmcrew")
    }

    /// Names of the entries in `output/`, sorted.
    pub fn output_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.output_dir())
            .expect("read output dir")
            .map(|entry| {
                entry
                    .expect("output entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
