use super::context::ShotContext;
use super::{CrewBackend, Department};
use crate::lm::{extract_structured_output, run_lm, LmCommand};
use crate::templates::{agent_prompt, SHOT_CONTEXT_PLACEHOLDER};
use anyhow::{Context, Result};
use serde_json::Value;
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

/// Crew backed by an external LM CLI, one call per department per shot.
#[derive(Debug, Clone)]
pub struct LmBackend {
    command: LmCommand,
    agents_dir: Option<PathBuf>,
}

impl LmBackend {
    /// `agents_dir` holds project prompt overrides named `<department key>.md`.
    pub fn new(command: LmCommand, agents_dir: Option<PathBuf>) -> Self {
        Self {
            command,
            agents_dir,
        }
    }

    fn template(&self, department: Department) -> Result<Cow<'static, str>> {
        if let Some(dir) = &self.agents_dir {
            let path = dir.join(department.prompt_file_name());
            if path.is_file() {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("read agent prompt {}", path.display()))?;
                return Ok(Cow::Owned(text));
            }
        }
        Ok(Cow::Borrowed(agent_prompt(department)))
    }

    pub fn render_prompt(
        &self,
        department: Department,
        context: &ShotContext<'_>,
    ) -> Result<String> {
        let template = self.template(department)?;
        let context_json =
            serde_json::to_string_pretty(context).context("serialize shot context")?;
        if template.contains(SHOT_CONTEXT_PLACEHOLDER) {
            return Ok(template.replace(SHOT_CONTEXT_PLACEHOLDER, &context_json));
        }
        Ok(format!(
            "{}\n\n## Shot context\n\n```json\n{context_json}\n```\n",
            template.trim_end()
        ))
    }
}

impl CrewBackend for LmBackend {
    fn label(&self) -> &'static str {
        "lm"
    }

    fn consult(&self, department: Department, context: &ShotContext<'_>) -> Result<Value> {
        let prompt = self.render_prompt(department, context)?;
        tracing::debug!(
            department = department.key(),
            shot = %context.shot.shot_id,
            "consulting LM"
        );
        let reply = run_lm(&prompt, &self.command)
            .with_context(|| format!("{} LM call", department.name()))?;
        extract_structured_output(&reply)
            .with_context(|| format!("{} reply", department.name()))
    }
}
