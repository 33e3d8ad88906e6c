//! The film crew: eight departments consulted in order for every shot.
//!
//! A backend answers one department at a time with a JSON object. The crew
//! decodes that object into the department's typed plan, feeds it forward to
//! later departments as `prior` notes and records the call in the agent log.
//! A failed call never stops the shot: it is logged as `failed` and the
//! department's plan stays at its defaults.
mod context;
mod department;
mod heuristic;
mod lm_backend;
mod log;
mod plans;

pub use context::{SceneBrief, ShotContext};
pub use department::Department;
pub use heuristic::HeuristicBackend;
pub use lm_backend::LmBackend;
pub use log::{
    AgentLog, AgentLogBook, ExecutionReport, ExecutionStatus, AGENT_LOGS_DIR,
    EXECUTION_REPORT_FILE,
};
pub use plans::{
    BreakdownNote, CameraPlan, CharacterNote, CharacterPlan, EnvironmentPlan, LightingPlan,
    MusicCue, SoundPlan, SynthesisNote, TechnicalSummary,
};

use crate::screenplay::{Scene, Shot};
use crate::util::iso_timestamp;
use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

/// Answers one department's question about one shot.
pub trait CrewBackend {
    fn label(&self) -> &'static str;
    fn consult(&self, department: Department, context: &ShotContext<'_>) -> Result<Value>;
}

/// Every department's plan for one shot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShotNotes {
    pub breakdown: BreakdownNote,
    pub characters: CharacterPlan,
    pub environment: EnvironmentPlan,
    pub camera: CameraPlan,
    pub lighting: LightingPlan,
    pub sound: SoundPlan,
    pub music: MusicCue,
    pub synthesis: SynthesisNote,
}

impl ShotNotes {
    fn absorb(&mut self, department: Department, value: Value) -> Result<()> {
        let context = || format!("decode {department} notes");
        match department {
            Department::ScriptBreakdown => {
                self.breakdown = serde_json::from_value(value).with_context(context)?
            }
            Department::CharacterAnalysis => {
                self.characters = serde_json::from_value(value).with_context(context)?
            }
            Department::EnvironmentProps => {
                self.environment = serde_json::from_value(value).with_context(context)?
            }
            Department::CameraDirector => {
                self.camera = serde_json::from_value(value).with_context(context)?
            }
            Department::LightingDesigner => {
                self.lighting = serde_json::from_value(value).with_context(context)?
            }
            Department::SoundDesigner => {
                self.sound = serde_json::from_value(value).with_context(context)?
            }
            Department::MusicDirector => {
                self.music = serde_json::from_value(value).with_context(context)?
            }
            Department::PromptSynthesis => {
                self.synthesis = serde_json::from_value(value).with_context(context)?
            }
        }
        Ok(())
    }

    /// The plan one department contributed, as written to its output folder.
    pub fn department_json(&self, department: Department) -> Result<Value> {
        let value = match department {
            Department::ScriptBreakdown => serde_json::to_value(&self.breakdown),
            Department::CharacterAnalysis => serde_json::to_value(&self.characters),
            Department::EnvironmentProps => serde_json::to_value(&self.environment),
            Department::CameraDirector => serde_json::to_value(&self.camera),
            Department::LightingDesigner => serde_json::to_value(&self.lighting),
            Department::SoundDesigner => serde_json::to_value(&self.sound),
            Department::MusicDirector => serde_json::to_value(&self.music),
            Department::PromptSynthesis => serde_json::to_value(&self.synthesis),
        };
        value.with_context(|| format!("serialize {department} notes"))
    }
}

/// Runs every department for each shot and keeps the execution log.
pub struct Crew<'a> {
    backend: &'a dyn CrewBackend,
    log: AgentLogBook,
}

impl<'a> Crew<'a> {
    pub fn new(backend: &'a dyn CrewBackend) -> Self {
        Self {
            backend,
            log: AgentLogBook::default(),
        }
    }

    pub fn consult_shot(&mut self, scene: &Scene, shot: &Shot) -> ShotNotes {
        let mut context = ShotContext::new(scene, shot);
        let mut notes = ShotNotes::default();
        for department in Department::ALL {
            let timestamp = iso_timestamp(&Local::now());
            let (input_data, input_error) = input_snapshot(&context);
            if let Some(error) = &input_error {
                tracing::warn!(
                    department = department.key(),
                    shot = %shot.shot_id,
                    error = %error,
                    "agent input not recorded"
                );
            }
            let started = Instant::now();
            let outcome = self
                .backend
                .consult(department, &context)
                .and_then(|value| {
                    notes.absorb(department, value.clone())?;
                    Ok(value)
                });
            let execution_time = started.elapsed().as_secs_f64();

            let (status, output_data, mut errors) = match outcome {
                Ok(value) => {
                    context.prior.insert(department.key(), value.clone());
                    (ExecutionStatus::Success, value, Vec::new())
                }
                Err(err) => {
                    tracing::warn!(
                        department = department.key(),
                        shot = %shot.shot_id,
                        error = %format!("{err:#}"),
                        "agent failed; using defaults"
                    );
                    (ExecutionStatus::Failed, Value::Null, vec![format!("{err:#}")])
                }
            };
            errors.extend(input_error);
            self.log.record(
                department,
                AgentLog {
                    agent_name: department.name().to_string(),
                    agent_role: department.role().to_string(),
                    timestamp,
                    scene_number: scene.scene_number,
                    shot_number: shot.shot_number,
                    input_data,
                    output_data,
                    execution_time,
                    status,
                    errors,
                },
            );
        }
        notes
    }

    pub fn backend_label(&self) -> &'static str {
        self.backend.label()
    }

    pub fn into_log(self) -> AgentLogBook {
        self.log
    }
}

/// JSON copy of an agent's input for the log, or why it could not be made.
fn input_snapshot<T: Serialize>(input: &T) -> (Value, Option<String>) {
    match serde_json::to_value(input) {
        Ok(value) => (value, None),
        Err(err) => (Value::Null, Some(format!("serialize agent input: {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screenplay::parse_screenplay;
    use anyhow::anyhow;

    struct FlakyCamera;

    impl CrewBackend for FlakyCamera {
        fn label(&self) -> &'static str {
            "flaky"
        }

        fn consult(&self, department: Department, context: &ShotContext<'_>) -> Result<Value> {
            match department {
                Department::CameraDirector => Err(anyhow!("camera offline")),
                Department::LightingDesigner => Ok(serde_json::json!({"mood": 42})),
                _ => HeuristicBackend.consult(department, context),
            }
        }
    }

    const SCRIPT: &str = "EXT. PIER - DUSK\n\nLENA waits by the rail.\n\nLENA\nYou came.\n";

    #[test]
    fn failed_departments_are_logged_and_defaulted() {
        let screenplay = parse_screenplay(SCRIPT);
        let scene = &screenplay.scenes[0];
        let backend = FlakyCamera;
        let mut crew = Crew::new(&backend);
        let notes = crew.consult_shot(scene, &scene.shots[0]);

        assert_eq!(notes.camera, CameraPlan::default());
        assert_eq!(notes.lighting, LightingPlan::default());
        assert_eq!(notes.music.presence, "silence");
        // Synthesis saw no camera notes, so the lens is missing from its summary.
        assert_eq!(notes.synthesis.technical_summary.camera, scene.shots[0].shot_type);

        let log = crew.into_log();
        assert_eq!(log.len(), Department::ALL.len());
        assert_eq!(log.failures(), 2);
        let report = log.report("now");
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].errors[0].contains("camera offline"));
    }

    #[test]
    fn unserializable_input_is_reported_not_dropped() {
        let mut keyed = std::collections::BTreeMap::new();
        keyed.insert((1u32, 2u32), "shot");
        let (value, error) = input_snapshot(&keyed);
        assert_eq!(value, Value::Null);
        assert!(error.unwrap().starts_with("serialize agent input"));

        let screenplay = parse_screenplay(SCRIPT);
        let context = ShotContext::new(&screenplay.scenes[0], &screenplay.scenes[0].shots[0]);
        let (value, error) = input_snapshot(&context);
        assert!(error.is_none());
        assert!(value.is_object());
    }

    #[test]
    fn later_departments_see_prior_notes() {
        let screenplay = parse_screenplay(SCRIPT);
        let scene = &screenplay.scenes[0];
        let mut crew = Crew::new(&HeuristicBackend);
        let notes = crew.consult_shot(scene, &scene.shots[0]);
        assert_eq!(notes.camera.lens, "24mm");
        assert_eq!(
            notes.synthesis.technical_summary.camera,
            "WIDE ESTABLISHING, 24mm"
        );
    }
}
