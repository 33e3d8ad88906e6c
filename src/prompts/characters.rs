use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a character looks and feels, kept identical across every prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CharacterProfile {
    pub age: String,
    pub ethnicity: String,
    pub gender: String,
    pub physical_description: String,
    pub wardrobe_style: String,
    pub personality_traits: Vec<String>,
    /// Emotional state keyed by scene number.
    pub emotional_arc: BTreeMap<String, String>,
    pub relationships: BTreeMap<String, String>,
}

impl CharacterProfile {
    /// `Name, 40s, female, ..., (state in this scene), wearing ...`.
    pub fn describe(&self, name: &str, scene_number: u32) -> String {
        let mut parts = Vec::new();
        if !self.age.is_empty() && !self.gender.is_empty() {
            parts.push(format!("{name}, {}, {}", self.age, self.gender));
        } else {
            parts.push(name.to_string());
        }
        if !self.ethnicity.is_empty() {
            parts.push(self.ethnicity.clone());
        }
        if !self.physical_description.is_empty() {
            parts.push(self.physical_description.clone());
        }
        if let Some(state) = self.emotional_arc.get(&scene_number.to_string()) {
            parts.push(format!("({state})"));
        }
        if !self.wardrobe_style.is_empty() {
            parts.push(format!("wearing {}", self.wardrobe_style));
        }
        parts.join(", ")
    }
}

/// Configured profiles plus the aliases that point at them.
///
/// Script names are matched case-insensitively, so `SARAH` in a cue finds
/// the `Sarah` profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterRegistry {
    profiles: BTreeMap<String, CharacterProfile>,
    aliases: BTreeMap<String, String>,
}

impl CharacterRegistry {
    pub fn new(
        profiles: BTreeMap<String, CharacterProfile>,
        aliases: BTreeMap<String, String>,
    ) -> Result<Self> {
        for (alias, target) in &aliases {
            if !profiles.keys().any(|name| name.eq_ignore_ascii_case(target)) {
                return Err(anyhow!(
                    "character alias {alias:?} points at unknown profile {target:?}"
                ));
            }
        }
        Ok(Self { profiles, aliases })
    }

    /// The canonical profile name for a script name, following aliases.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        let target = self
            .aliases
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|(_, target)| target.as_str())
            .unwrap_or(name);
        self.profiles
            .keys()
            .find(|profile| profile.eq_ignore_ascii_case(target))
            .map(String::as_str)
            .unwrap_or(target)
    }

    pub fn profile(&self, name: &str) -> Option<&CharacterProfile> {
        self.profiles.get(self.canonical(name))
    }

    /// Consistent description for a character in a scene; the bare name
    /// when no profile exists.
    pub fn describe(&self, name: &str, scene_number: u32) -> String {
        let canonical = self.canonical(name);
        match self.profiles.get(canonical) {
            Some(profile) => profile.describe(canonical, scene_number),
            None => name.to_string(),
        }
    }
}
