use super::model::{Appearance, Segment, SegmentKind, Vignette, VignetteScript, VignetteStats};
use crate::util::{push_unique, title_case};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Sections this short or shorter carry no vignette.
const MIN_SECTION_CHARS: usize = 50;

static VIGNETTE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Vignette #\d+|NARRATION \(Vignette #\d+\)").expect("regex for vignette markers")
});
static TRANSITION_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TRANSITION TO[.\s]*").expect("regex for transition splits"));
static VIDEO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Video:\s*(.*)$").expect("regex for video lines"));
static VO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^VO:\s*(.*)$").expect("regex for VO lines"));
static VISUAL_NOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^VISUAL NOTES:?\s*(.*)$").expect("regex for visual notes")
});
static ON_SCREEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:On screen text:|Text on screen:|Text overlay:)\s*(.+)")
        .expect("regex for on-screen text")
});
static TEXT_ON_DEVICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)Text on (?:watch|screen|device):\s*["']?(.+?)["']?$"#)
        .expect("regex for device text")
});
static DIGITAL_ASSISTANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Digital assistant voice:\s*(.+)").expect("regex for assistant voice")
});
static PATIENT_VOICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Patient voice:\s*\(([^)]+)\)\s*(.+)").expect("regex for patient voice")
});
static MEET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bMeet\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").expect("regex for introductions")
});
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Year:\s*(\d{4})").expect("regex for years"));
static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Time:\s*(\d{1,2}:\d{2}\s*[ap]m)").expect("regex for clock times")
});
static TRANSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)TRANSITION TO|CUT TO|FADE TO|DISSOLVE TO").expect("regex for transitions")
});

/// Script-specific vocabulary for vignette parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VignetteRules {
    /// Names recognised verbatim in segment text.
    pub known_characters: Vec<String>,
    /// Lower-case keywords that name a location when found in a video segment.
    pub location_keywords: Vec<String>,
}

impl Default for VignetteRules {
    fn default() -> Self {
        Self {
            known_characters: Vec::new(),
            location_keywords: ["farmhouse", "home", "office", "hospital"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

pub fn parse_vignettes(content: &str, rules: &VignetteRules) -> VignetteScript {
    let mut sections: Vec<&str> = VIGNETTE_MARKER.split(content).collect();
    if sections.len() <= 1 {
        sections = TRANSITION_SPLIT.split(content).collect();
    }

    let mut vignettes = Vec::new();
    for section in sections {
        if section.trim().chars().count() <= MIN_SECTION_CHARS {
            continue;
        }
        let vignette = parse_section(section, vignettes.len() as u32 + 1, rules);
        if !vignette.segments.is_empty() {
            vignettes.push(vignette);
        }
    }
    if vignettes.is_empty() {
        vignettes.push(parse_section(content, 1, rules));
    }

    let stats = compute_stats(&vignettes);
    tracing::debug!(
        vignettes = stats.total_scenes,
        segments = stats.total_segments,
        "vignettes parsed"
    );
    VignetteScript { vignettes, stats }
}

struct SectionState<'r> {
    number: u32,
    next_segment: u32,
    segments: Vec<Segment>,
    current: Option<Segment>,
    buffer: Vec<String>,
    rules: &'r VignetteRules,
}

impl SectionState<'_> {
    fn start(&mut self, kind: SegmentKind, first_line: &str) {
        self.finish_current();
        self.current = Some(Segment::new(self.number, self.next_segment, kind));
        self.next_segment += 1;
        if !first_line.is_empty() {
            self.content_line(first_line);
        }
    }

    fn standalone(&mut self, kind: SegmentKind) -> Segment {
        let segment = Segment::new(self.number, self.next_segment, kind);
        self.next_segment += 1;
        segment
    }

    fn finish_current(&mut self) {
        if let Some(mut segment) = self.current.take() {
            segment.content = self.buffer.join("\n");
            self.buffer.clear();
            if !segment.content.is_empty()
                || !segment.on_screen_text.is_empty()
                || !segment.narration.is_empty()
            {
                if segment.kind == SegmentKind::Video {
                    segment.location = locations_in(&segment.content, self.rules)
                        .into_iter()
                        .next()
                        .unwrap_or_default();
                }
                self.segments.push(segment);
            }
        }
    }

    fn content_line(&mut self, line: &str) {
        let Some(segment) = self.current.as_mut() else {
            return;
        };
        self.buffer.push(line.to_string());
        for name in &self.rules.known_characters {
            if line.contains(name.as_str()) {
                push_unique(&mut segment.characters_mentioned, name);
            }
        }
        for caps in MEET.captures_iter(line) {
            push_unique(&mut segment.characters_mentioned, &caps[1]);
        }
        if let Some(caps) = YEAR.captures(line) {
            segment.time_period = caps[1].to_string();
        }
        if let Some(caps) = CLOCK_TIME.captures(line) {
            if segment.time_period.is_empty() {
                segment.time_period = caps[1].to_string();
            } else {
                segment.time_period = format!("{} {}", segment.time_period, &caps[1]);
            }
        }
    }
}

fn parse_section(section: &str, number: u32, rules: &VignetteRules) -> Vignette {
    let mut state = SectionState {
        number,
        next_segment: 1,
        segments: Vec::new(),
        current: None,
        buffer: Vec::new(),
        rules,
    };

    for raw in section.lines() {
        let line = raw.trim();
        if let Some(caps) = VIDEO.captures(line) {
            state.start(SegmentKind::Video, caps[1].trim());
        } else if let Some(caps) = VO.captures(line) {
            state.start(SegmentKind::Vo, caps[1].trim());
        } else if let Some(caps) = VISUAL_NOTES
            .captures(line)
            .filter(|_| state.current.is_some())
        {
            if let Some(segment) = state.current.as_mut() {
                segment.visual_notes = caps[1].trim().to_string();
            }
        } else if let Some(text) = overlay_text(line) {
            match state.current.as_mut() {
                Some(segment) => segment.on_screen_text = text,
                None => {
                    let mut overlay = state.standalone(SegmentKind::TextOverlay);
                    overlay.content = text.clone();
                    overlay.on_screen_text = text;
                    state.segments.push(overlay);
                }
            }
        } else if let Some(caps) = DIGITAL_ASSISTANT.captures(line) {
            let narration = format!("Digital Assistant: {}", &caps[1]);
            match state.current.as_mut() {
                Some(segment) => segment.narration = narration,
                None => {
                    let mut voice = state.standalone(SegmentKind::Vo);
                    voice.content = caps[1].to_string();
                    voice.narration = narration;
                    state.segments.push(voice);
                }
            }
        } else if let Some(caps) = PATIENT_VOICE.captures(line) {
            let character = caps[1].trim().to_string();
            let narration = format!("{character}: {}", &caps[2]);
            match state.current.as_mut() {
                Some(segment) => {
                    segment.narration = narration;
                    push_unique(&mut segment.characters_mentioned, &character);
                }
                None => {
                    let mut voice = state.standalone(SegmentKind::Vo);
                    voice.content = caps[2].to_string();
                    voice.narration = narration;
                    voice.characters_mentioned = vec![character];
                    state.segments.push(voice);
                }
            }
        } else if !line.is_empty() {
            state.content_line(line);
        }
    }
    state.finish_current();

    let segments = state.segments;
    let mut characters = BTreeSet::new();
    let mut locations = BTreeSet::new();
    let mut transitions = Vec::new();
    let mut video = 0;
    let mut vo = 0;
    for segment in &segments {
        characters.extend(segment.characters_mentioned.iter().cloned());
        match segment.kind {
            SegmentKind::Video => {
                video += 1;
                locations.extend(locations_in(&segment.content, rules));
            }
            SegmentKind::Vo => vo += 1,
            SegmentKind::TextOverlay => {}
        }
        if let Some(found) = TRANSITION.find(&segment.content) {
            transitions.push(found.as_str().to_string());
        }
    }

    Vignette {
        scene_number: number,
        scene_title: section_title(section, number),
        segments,
        total_video_segments: video,
        total_vo_segments: vo,
        characters: characters.into_iter().collect(),
        locations: locations.into_iter().collect(),
        transitions,
    }
}

/// First line of the section (minus the marker's trailing colon) when it reads as a title.
fn section_title(section: &str, number: u32) -> String {
    let first = section
        .lines()
        .map(|line| line.trim().trim_start_matches([':', '-']).trim())
        .find(|line| !line.is_empty())
        .unwrap_or_default();
    let len = first.chars().count();
    if len > 5 && len < 100 {
        first.to_string()
    } else {
        format!("Vignette {number}")
    }
}

fn overlay_text(line: &str) -> Option<String> {
    ON_SCREEN
        .captures(line)
        .or_else(|| TEXT_ON_DEVICE.captures(line))
        .map(|caps| caps[1].trim().trim_matches(['"', '\'']).to_string())
}

fn locations_in(content: &str, rules: &VignetteRules) -> Vec<String> {
    let lower = content.to_lowercase();
    rules
        .location_keywords
        .iter()
        .filter(|keyword| lower.contains(&keyword.to_lowercase()))
        .map(|keyword| title_case(keyword))
        .collect()
}

fn compute_stats(vignettes: &[Vignette]) -> VignetteStats {
    let mut characters = BTreeSet::new();
    let mut locations = BTreeSet::new();
    let mut time_periods = BTreeSet::new();
    let mut overlays = 0;
    for vignette in vignettes {
        characters.extend(vignette.characters.iter().cloned());
        locations.extend(vignette.locations.iter().cloned());
        for segment in &vignette.segments {
            if segment.kind == SegmentKind::TextOverlay {
                overlays += 1;
            }
            if !segment.time_period.is_empty() {
                time_periods.insert(segment.time_period.clone());
            }
        }
    }
    VignetteStats {
        total_scenes: vignettes.len(),
        total_segments: vignettes.iter().map(|v| v.segments.len()).sum(),
        total_video_segments: vignettes.iter().map(|v| v.total_video_segments).sum(),
        total_vo_segments: vignettes.iter().map(|v| v.total_vo_segments).sum(),
        total_text_overlays: overlays,
        characters: characters.into_iter().collect(),
        locations: locations.into_iter().collect(),
        time_periods: time_periods.into_iter().collect(),
    }
}

/// Every segment each character is mentioned in.
pub fn character_appearances(vignettes: &[Vignette]) -> BTreeMap<String, Vec<Appearance>> {
    let mut appearances: BTreeMap<String, Vec<Appearance>> = BTreeMap::new();
    for vignette in vignettes {
        for segment in &vignette.segments {
            for character in &segment.characters_mentioned {
                appearances
                    .entry(character.clone())
                    .or_default()
                    .push(Appearance {
                        vignette: vignette.scene_number,
                        segment: segment.segment_id.clone(),
                        kind: segment.kind,
                    });
            }
        }
    }
    appearances
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
