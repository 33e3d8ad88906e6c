//! Traditional screenplay analysis.
//!
//! Scenes are located by their sluglines; each scene body is split into
//! action, dialogue and voice-over, then planned into camera coverage.
mod model;
mod parse;
mod patterns;
mod shots;
mod stats;

pub use model::{
    speaker_name, DialogueBlock, Scene, SceneType, Screenplay, ScriptStats, Shot, ShotKind,
    Transition, VoiceKind, VoiceLine, VoiceOver, VoiceTiming,
};
pub use parse::parse_screenplay;
pub(crate) use shots::characters_in_action;
