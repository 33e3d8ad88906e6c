//! Vignette scripts: short pieces written as `Video:` / `VO:` blocks.
mod model;
mod parse;

pub use model::{Appearance, Segment, SegmentKind, Vignette, VignetteScript, VignetteStats};
pub use parse::{character_appearances, parse_vignettes, VignetteRules};
