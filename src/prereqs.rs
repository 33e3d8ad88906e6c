//! External tool checks.
//!
//! Only the LM backend shells out; the heuristic crew runs without any
//! external executable.
use crate::lm::{LmCommand, LM_COMMAND_ENV};
use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Resolve the LM executable on PATH (or as given, when it is a path).
pub fn locate_lm(command: &LmCommand) -> Option<PathBuf> {
    which::which(command.program()).ok()
}

/// Fail with install and usage guidance when the LM executable is missing.
pub fn ensure_lm_available(command: &LmCommand) -> Result<PathBuf> {
    match locate_lm(command) {
        Some(path) => {
            tracing::debug!(program = command.program(), path = %path.display(), "LM command found");
            Ok(path)
        }
        None => Err(anyhow!(
            "LM command `{}` not found on PATH\n\n{}",
            command.program(),
            guidance(command.program())
        )),
    }
}

fn guidance(program: &str) -> String {
    let mut lines = Vec::new();
    if program == "claude" {
        lines.push("Install the Claude CLI (npm install -g @anthropic-ai/claude-code) and sign in,".to_string());
        lines.push("or point filmcrew at another LM CLI:".to_string());
    } else {
        lines.push(format!("Install `{program}` or point filmcrew at another LM CLI:"));
    }
    lines.push("  filmcrew process <script> --backend lm --lm \"<command> [args]\"".to_string());
    lines.push(format!("  export {LM_COMMAND_ENV}=\"<command> [args]\""));
    lines.push("  or set \"lm_command\" in filmcrew.json".to_string());
    lines.push(String::new());
    lines.push("The default heuristic backend (--backend heuristic) needs no external tools.".to_string());
    lines.join("\n")
}
