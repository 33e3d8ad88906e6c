use super::Department;
use crate::screenplay::{Scene, SceneType, Shot};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The scene facts every department sees.
#[derive(Debug, Clone, Serialize)]
pub struct SceneBrief<'a> {
    pub scene_number: u32,
    pub heading: &'a str,
    pub location: &'a str,
    pub time_of_day: &'a str,
    pub scene_type: SceneType,
    pub interior: bool,
    pub description: &'a str,
    pub speakers: Vec<String>,
    #[serde(skip)]
    pub text: &'a str,
}

/// What one department is asked about: the shot, its scene and the notes
/// of departments consulted before it.
#[derive(Debug, Clone, Serialize)]
pub struct ShotContext<'a> {
    pub scene: SceneBrief<'a>,
    pub shot: &'a Shot,
    pub prior: BTreeMap<&'static str, Value>,
}

impl<'a> ShotContext<'a> {
    pub fn new(scene: &'a Scene, shot: &'a Shot) -> Self {
        Self {
            scene: SceneBrief {
                scene_number: scene.scene_number,
                heading: &scene.heading,
                location: &scene.location,
                time_of_day: &scene.time_of_day,
                scene_type: scene.scene_type,
                interior: scene.is_interior(),
                description: &scene.description,
                speakers: scene.speakers(),
                text: &scene.text,
            },
            shot,
            prior: BTreeMap::new(),
        }
    }

    pub fn prior(&self, department: Department) -> Option<&Value> {
        self.prior.get(department.key())
    }

    /// A string field from an earlier department's notes.
    pub fn prior_str(&self, department: Department, field: &str) -> Option<&str> {
        self.prior(department)
            .and_then(|notes| notes.get(field))
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }
}
