//! Screenplay recognition patterns.
use regex::Regex;
use std::sync::LazyLock;

pub(crate) static SCENE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mi)^(INT\.|EXT\.|INT/EXT\.|I/E\.)[ \t]+(.+?)[ \t]*(?:--|[-–—])[ \t]*(.+?)(?:[ \t]*(?:--|[-–—])[ \t]*(.+))?[ \t]*$",
    )
    .expect("regex for scene headings")
});

pub(crate) static TRANSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mi)^[ \t]*(FADE IN|FADE OUT|FADE TO|CUT TO|DISSOLVE TO|MATCH CUT TO|SMASH CUT TO|INTERCUT WITH|BACK TO|ANGLE ON|CLOSE ON)[:.]?[ \t]*$",
    )
    .expect("regex for transitions")
});

pub(crate) static VOICE_OVER_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][A-Z\s\.]+?)\s*\(V\.O\.\)$").expect("regex for voice-over cues")
});

pub(crate) static OFF_SCREEN_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][A-Z\s\.]+?)\s*\(O\.S\.\)$").expect("regex for off-screen cues")
});

pub(crate) static CHARACTER_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][A-Z\s\.]+)(?:\s*\([^)]+\))?$").expect("regex for character cues")
});

pub(crate) static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\([^)]+\)\s*$").expect("regex for parentheticals"));

/// Shot sizes in priority order; the first match names the shot.
pub(crate) static SHOT_TYPES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("WIDE", r"(?i)\b(WIDE|ESTABLISHING|EXTREME WIDE|FULL)\b"),
        ("MEDIUM", r"(?i)\b(MEDIUM|MED|TWO-SHOT|THREE-SHOT)\b"),
        ("CLOSE-UP", r"(?i)\b(CLOSE-UP|CLOSE UP|CU|TIGHT)\b"),
        ("EXTREME CLOSE-UP", r"(?i)\b(EXTREME CLOSE-UP|ECU|MACRO)\b"),
        ("OVER-THE-SHOULDER", r"(?i)\b(OVER THE SHOULDER|OTS|OVER SHOULDER)\b"),
        ("POV", r"(?i)\b(POV|POINT OF VIEW|P\.O\.V\.)"),
        ("INSERT", r"(?i)\b(INSERT|CUTAWAY)\b"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("regex for shot types")))
    .collect()
});

pub(crate) static CAMERA_MOVEMENTS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("PAN", r"(?i)\b(PAN|PANNING|PANS)\b"),
        ("TILT", r"(?i)\b(TILT|TILTING|TILTS)\b"),
        ("DOLLY", r"(?i)\b(DOLLY|DOLLYING|DOLLIES|TRACK|TRACKING)\b"),
        ("CRANE", r"(?i)\b(CRANE|CRANING|BOOM)\b"),
        ("HANDHELD", r"(?i)\b(HANDHELD|HAND-HELD|SHAKY)\b"),
        ("STEADICAM", r"(?i)\b(STEADICAM|STEADY CAM|SMOOTH)\b"),
        ("ZOOM", r"(?i)\b(ZOOM|ZOOMING|ZOOMS)\b"),
        ("STATIC", r"(?i)\b(STATIC|LOCKED OFF|FIXED)\b"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("regex for camera movements")))
    .collect()
});

pub(crate) static FLASHBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(FLASHBACK|FLASH BACK|YEARS? AGO|EARLIER)\b").expect("regex for flashbacks")
});

pub(crate) static DREAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(DREAM|NIGHTMARE|FANTASY|IMAGINATION)\b").expect("regex for dreams")
});

pub(crate) static MONTAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(MONTAGE|SERIES OF SHOTS|SEQUENCE)\b").expect("regex for montages")
});

/// First shot size named in `text`.
pub(crate) fn shot_type_in(text: &str) -> Option<&'static str> {
    SHOT_TYPES
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(name, _)| *name)
}

/// Every camera movement named in `text`, in table order.
pub(crate) fn movements_in(text: &str) -> Vec<&'static str> {
    CAMERA_MOVEMENTS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(name, _)| *name)
        .collect()
}

/// Canonical transition name for a transition line, if it is one.
pub(crate) fn transition_kind(line: &str) -> Option<String> {
    TRANSITION
        .captures(line)
        .map(|caps| caps[1].to_uppercase())
}
