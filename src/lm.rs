//! External LM CLI invocation and JSON reply extraction.
//!
//! The crew's LM backend never talks to a model directly. It renders a prompt,
//! hands it to a user-configured command (Claude CLI by default) and pulls a
//! single JSON object out of whatever the command prints.
//!
//! The command is resolved in priority order:
//! 1. `--lm` CLI flag
//! 2. `FILMCREW_LM_COMMAND` environment variable
//! 3. `lm_command` in `filmcrew.json`
//! 4. the built-in Claude CLI invocation
//!
//! A command string is either a JSON object `{"command": [...]}` or a shell
//! style string split with `shell-words`. An argument equal to `{prompt}` is
//! replaced by the prompt text; otherwise the prompt goes to stdin.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Instant;

pub const LM_COMMAND_ENV: &str = "FILMCREW_LM_COMMAND";

const PROMPT_PLACEHOLDER: &str = "{prompt}";

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LmCommandConfig {
    command: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LmCommand {
    pub argv: Vec<String>,
}

impl LmCommand {
    /// Executable name looked up on PATH.
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    pub fn display(&self) -> String {
        shell_words::join(&self.argv)
    }
}

/// Resolve the LM command from the flag, environment, config and defaults.
pub fn resolve_lm_command(flag: Option<&str>, configured: Option<&str>) -> Result<LmCommand> {
    if let Some(raw) = flag {
        return parse_lm_command(raw).context("parse --lm");
    }
    if let Ok(raw) = env::var(LM_COMMAND_ENV) {
        if !raw.trim().is_empty() {
            return parse_lm_command(&raw).with_context(|| format!("parse {LM_COMMAND_ENV}"));
        }
    }
    if let Some(raw) = configured {
        return parse_lm_command(raw).context("parse lm_command in config");
    }
    Ok(default_lm_command())
}

pub fn parse_lm_command(raw: &str) -> Result<LmCommand> {
    let trimmed = raw.trim();
    let argv = if trimmed.starts_with('{') {
        let config: LmCommandConfig =
            serde_json::from_str(trimmed).context("parse LM command JSON")?;
        config.command
    } else {
        shell_words::split(trimmed).with_context(|| format!("parse LM command: {trimmed}"))?
    };
    if argv.first().is_none_or(|program| program.trim().is_empty()) {
        return Err(anyhow!("LM command is empty"));
    }
    Ok(LmCommand { argv })
}

pub fn default_lm_command() -> LmCommand {
    LmCommand {
        argv: vec![
            "claude".to_string(),
            "--print".to_string(),
            "--output-format".to_string(),
            "json".to_string(),
            "--no-session-persistence".to_string(),
            "--system-prompt".to_string(),
            "Return a single JSON object only. No prose or code fences.".to_string(),
            "--tools".to_string(),
            "".to_string(),
        ],
    }
}

/// Run the LM command once and return its stdout.
pub fn run_lm(prompt: &str, command: &LmCommand) -> Result<String> {
    let mut argv = command.argv.clone();
    if argv.is_empty() {
        return Err(anyhow!("LM command is empty"));
    }
    let mut has_placeholder = false;
    for arg in &mut argv {
        if arg == PROMPT_PLACEHOLDER {
            *arg = prompt.to_string();
            has_placeholder = true;
        }
    }
    let program = argv.remove(0);
    let mut child = Command::new(&program);
    child
        .args(&argv)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(if has_placeholder {
            Stdio::null()
        } else {
            Stdio::piped()
        });

    let start = Instant::now();
    let mut child = child
        .spawn()
        .with_context(|| format!("spawn LM command: {program}"))?;
    if !has_placeholder {
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(prompt.as_bytes())
                .context("write prompt to LM stdin")?;
        }
    }
    let output = child.wait_with_output().context("wait for LM command")?;
    let elapsed_ms = start.elapsed().as_millis();

    tracing::info!(
        elapsed_ms,
        prompt_bytes = prompt.len(),
        response_bytes = output.stdout.len(),
        "lm invoke complete"
    );

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "LM command failed with status {}: {}",
            output.status,
            stderr.trim()
        ));
    }
    String::from_utf8(output.stdout).context("decode LM stdout as UTF-8")
}

/// Pull the JSON object out of an LM reply.
///
/// Accepts a bare object, Claude's `structured_output` / `result` envelopes,
/// fenced code blocks and objects embedded in prose.
pub fn extract_structured_output(response: &str) -> Result<Value> {
    let cleaned = strip_code_fences(response);
    let value = match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => unwrap_envelope(value)?,
        Err(err) => extract_json_from_text(&cleaned)
            .ok_or_else(|| anyhow!("LM response is not JSON: {err}"))?,
    };
    if !value.is_object() {
        return Err(anyhow!("LM response is not a JSON object"));
    }
    Ok(value)
}

fn unwrap_envelope(value: Value) -> Result<Value> {
    if let Some(structured) = value.get("structured_output") {
        return Ok(structured.clone());
    }
    if let Some(result) = value.get("result").and_then(Value::as_str) {
        let cleaned = strip_code_fences(result);
        return match serde_json::from_str(&cleaned) {
            Ok(parsed) => Ok(parsed),
            Err(err) => extract_json_from_text(&cleaned)
                .ok_or_else(|| anyhow!("result JSON failed to parse: {err}")),
        };
    }
    Ok(value)
}

fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    let mut lines: Vec<&str> = trimmed.lines().collect();
    if lines
        .first()
        .is_some_and(|first| first.trim_start().starts_with("```"))
    {
        lines.remove(0);
    }
    if lines
        .last()
        .is_some_and(|last| last.trim_start().starts_with("```"))
    {
        lines.pop();
    }
    lines.join("\n").trim().to_string()
}

fn extract_json_from_text(raw: &str) -> Option<Value> {
    for (idx, ch) in raw.char_indices() {
        if ch != '{' {
            continue;
        }
        let mut deserializer = serde_json::Deserializer::from_str(&raw[idx..]);
        if let Ok(value) = Value::deserialize(&mut deserializer) {
            return Some(value);
        }
    }
    None
}
