use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Video,
    Vo,
    TextOverlay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub segment_id: String,
    pub segment_number: u32,
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub content: String,
    pub visual_notes: String,
    pub narration: String,
    pub on_screen_text: String,
    pub characters_mentioned: Vec<String>,
    pub location: String,
    pub time_period: String,
}

impl Segment {
    pub(crate) fn new(vignette: u32, number: u32, kind: SegmentKind) -> Self {
        Self {
            segment_id: format!("{vignette}-{number:03}"),
            segment_number: number,
            kind,
            content: String::new(),
            visual_notes: String::new(),
            narration: String::new(),
            on_screen_text: String::new(),
            characters_mentioned: Vec::new(),
            location: String::new(),
            time_period: String::new(),
        }
    }

    pub fn padded_number(&self) -> String {
        format!("{:03}", self.segment_number)
    }
}

/// One vignette: a titled run of video, voice-over and overlay segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vignette {
    pub scene_number: u32,
    pub scene_title: String,
    pub segments: Vec<Segment>,
    pub total_video_segments: usize,
    pub total_vo_segments: usize,
    pub characters: Vec<String>,
    pub locations: Vec<String>,
    pub transitions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VignetteStats {
    pub total_scenes: usize,
    pub total_segments: usize,
    pub total_video_segments: usize,
    pub total_vo_segments: usize,
    pub total_text_overlays: usize,
    pub characters: Vec<String>,
    pub locations: Vec<String>,
    pub time_periods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VignetteScript {
    pub vignettes: Vec<Vignette>,
    pub stats: VignetteStats,
}

/// Where a character shows up, for the character sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appearance {
    pub vignette: u32,
    pub segment: String,
    #[serde(rename = "type")]
    pub kind: SegmentKind,
}
