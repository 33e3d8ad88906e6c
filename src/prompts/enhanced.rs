use super::characters::CharacterRegistry;
use super::{render_sections, sentences, PromptSource};
use crate::screenplay::{SceneType, VoiceTiming};
use crate::util::{capitalize, join_natural, truncate_chars};

pub const ENHANCED_DIR: &str = "Veo3_Enhanced_Prompts";
pub const ENHANCED_MASTER_FILE: &str = "ALL_ENHANCED_PROMPTS.txt";

const MAX_TEXTURES: usize = 5;
const MAX_VOICE_OVERS: usize = 2;

/// Natural prompt plus consistent character descriptions and spoken content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnhancedPrompt {
    pub subject: String,
    pub characters: String,
    pub context: String,
    pub action: String,
    pub dialogue_and_vo: String,
    pub style: String,
    pub camera_motion: String,
    pub composition: String,
    pub ambiance: String,
    pub texture: String,
    pub environment: String,
}

impl EnhancedPrompt {
    pub fn to_text(&self) -> String {
        render_sections(&[
            ("Subject", self.subject.as_str()),
            ("Characters", self.characters.as_str()),
            ("Context", self.context.as_str()),
            ("Action", self.action.as_str()),
            ("Dialogue/VO", self.dialogue_and_vo.as_str()),
            ("Style", self.style.as_str()),
            ("Camera Motion", self.camera_motion.as_str()),
            ("Composition", self.composition.as_str()),
            ("Ambiance", self.ambiance.as_str()),
            ("Texture", self.texture.as_str()),
            ("Environment", self.environment.as_str()),
        ])
    }
}

/// A character present in the shot, merged from the frame and the crew notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CastMember {
    name: String,
    movement: String,
    emotional_state: String,
    wardrobe: String,
}

pub fn enhanced_prompt(source: &PromptSource<'_>, registry: &CharacterRegistry) -> EnhancedPrompt {
    let cast = cast(source, registry);
    EnhancedPrompt {
        subject: subject(source, &cast),
        characters: characters(source, &cast, registry),
        context: context(source),
        action: action(source, &cast),
        dialogue_and_vo: dialogue_and_vo(source),
        style: style(source),
        camera_motion: camera_motion(source),
        composition: composition(source, &cast),
        ambiance: ambiance(source),
        texture: texture(source, &cast),
        environment: environment(source),
    }
}

/// Sorted `(stem, text)` pairs concatenated into `ALL_ENHANCED_PROMPTS.txt`.
pub fn master_file(entries: &[(String, String)]) -> String {
    let rule = "=".repeat(60);
    let mut out = format!(
        "ENHANCED VEO3 PROMPTS WITH CHARACTER CONSISTENCY & VOICE-OVERS\n{rule}\n\n"
    );
    for (stem, text) in entries {
        out.push_str(&format!("\n{rule}\n{stem}\n{rule}\n\n{text}\n"));
    }
    out
}

fn cast(source: &PromptSource<'_>, registry: &CharacterRegistry) -> Vec<CastMember> {
    let notes = source.characters();
    let names = source
        .shot
        .characters_in_frame
        .iter()
        .map(String::as_str)
        .chain(notes.iter().map(|note| note.name.as_str()))
        .filter(|name| !name.is_empty());

    let mut cast: Vec<CastMember> = Vec::new();
    for name in names {
        let canonical = registry.canonical(name);
        if cast.iter().any(|member| member.name == canonical) {
            continue;
        }
        let note = notes
            .iter()
            .find(|note| registry.canonical(&note.name) == canonical);
        let mut member = CastMember {
            name: canonical.to_string(),
            ..CastMember::default()
        };
        if let Some(note) = note {
            member.movement = note.movement.clone();
            member.emotional_state = note.emotional_state.clone();
            member.wardrobe = note.wardrobe.clone();
        }
        if member.wardrobe.is_empty() {
            if let Some(profile) = registry.profile(canonical) {
                member.wardrobe = profile.wardrobe_style.clone();
            }
        }
        cast.push(member);
    }
    cast
}

fn subject(source: &PromptSource<'_>, cast: &[CastMember]) -> String {
    let shot_type = source.shot_type().to_uppercase();
    let mut parts = Vec::new();
    if shot_type.contains("ESTABLISHING") {
        parts.push("Establishing shot:".to_string());
    } else if shot_type.contains("CLOSE") {
        parts.push("Close-up:".to_string());
    } else if shot_type.contains("WIDE") {
        parts.push("Wide shot:".to_string());
    }
    if !cast.is_empty() {
        let names: Vec<&str> = cast.iter().take(2).map(|member| member.name.as_str()).collect();
        parts.push(format!("Focus on {}", names.join(" and ")));
    }
    parts.push(format!(
        "in {} during {}",
        source.location(),
        source.time_of_day()
    ));
    format!("{}.", parts.join(" "))
}

fn characters(
    source: &PromptSource<'_>,
    cast: &[CastMember],
    registry: &CharacterRegistry,
) -> String {
    let descriptions: Vec<String> = cast
        .iter()
        .map(|member| registry.describe(&member.name, source.scene.scene_number))
        .collect();
    join_natural(&descriptions)
}

fn context(source: &PromptSource<'_>) -> String {
    let environment = &source.notes.environment;
    let location = source.location();
    let upper = location.to_uppercase();
    let mut parts = Vec::new();
    if environment.setting_description.is_empty() {
        parts.push(format!("The scene takes place in {location}"));
    } else {
        parts.push(environment.setting_description.clone());
    }
    if source.scene.scene_type == SceneType::Flashback {
        parts.push("(FLASHBACK SEQUENCE)".to_string());
    }
    if source.heading_is_interior() {
        parts.push("Interior location with".to_string());
        if upper.contains("OFFICE") {
            parts.push("professional furnishings and work environment".to_string());
        } else if upper.contains("HOME") {
            parts.push("residential comfort and personal touches".to_string());
        } else if upper.contains("COFFEE") {
            parts.push("public space ambiance and casual seating".to_string());
        }
    } else {
        parts.push("Exterior location featuring".to_string());
        if upper.contains("STREET") {
            parts.push("urban environment and city activity".to_string());
        } else if upper.contains("FARM") {
            parts.push("rural landscape and agricultural setting".to_string());
        }
    }
    let sources = source.notes.lighting.sources.join(" ").to_lowercase();
    if sources.contains("natural") {
        parts.push("Natural lighting dominates the scene".to_string());
    } else if sources.contains("practical") {
        parts.push("Practical lights provide motivated illumination".to_string());
    }
    sentences(&parts)
}

fn action(source: &PromptSource<'_>, cast: &[CastMember]) -> String {
    let mut parts = Vec::new();
    if !source.shot.description.is_empty() {
        parts.push(truncate_chars(&source.shot.description, 200));
    }
    for member in cast {
        if !member.movement.is_empty() && member.movement != "static" {
            parts.push(format!("{} {}", member.name, member.movement));
        }
        if !member.emotional_state.is_empty() {
            parts.push(format!("{} displays {}", member.name, member.emotional_state));
        }
    }
    let time = source.time_of_day().to_uppercase();
    if time.contains("DAWN") {
        parts.push("Dawn light gradually reveals details".to_string());
    } else if time.contains("DUSK") {
        parts.push("Sunset colors paint the scene".to_string());
    }
    if parts.is_empty() {
        return "Subtle movement maintains visual interest.".to_string();
    }
    parts.join(". ")
}

fn dialogue_and_vo(source: &PromptSource<'_>) -> String {
    let mut parts = Vec::new();
    match source.shot.dialogue.as_slice() {
        [] => {}
        [line] => parts.push(format!("Dialogue: \"{}...\"", truncate_chars(line, 100))),
        _ => parts.push("Characters exchange dialogue".to_string()),
    }
    for voice in source.scene.voice_overs.iter().take(MAX_VOICE_OVERS) {
        let label = match voice.timing {
            VoiceTiming::Transitional => "Voice-over (transition)",
            VoiceTiming::DuringScene => "Voice-over",
        };
        parts.push(format!(
            "{label} - {}: \"{}...\"",
            voice.character,
            truncate_chars(&voice.text, 150)
        ));
    }
    if parts.is_empty() {
        return "No dialogue in this shot.".to_string();
    }
    parts.join(" | ")
}

fn style(source: &PromptSource<'_>) -> String {
    let mut parts = vec![match source.scene.scene_type {
        SceneType::Flashback => "Flashback treatment with memory-like quality".to_string(),
        SceneType::Dream => "Dream sequence with ethereal atmosphere".to_string(),
        SceneType::Present | SceneType::Montage => {
            format!("{} visual treatment", capitalize(source.mood()))
        }
    }];
    let temperature = source.notes.lighting.color_temperature.as_str();
    if !temperature.is_empty() {
        parts.push(
            match temperature.chars().next() {
                Some('3') => "warm tones",
                Some('6') => "cool palette",
                _ => "neutral colors",
            }
            .to_string(),
        );
    }
    sentences(&parts)
}

fn camera_motion(source: &PromptSource<'_>) -> String {
    let movement = source.camera_movement();
    let lower = movement.to_lowercase();
    if source.shot_type().to_uppercase().contains("ESTABLISHING") {
        "Slow, revealing camera movement establishes the space with cinematic grandeur."
            .to_string()
    } else if lower.contains("static") {
        "Locked-off camera holds steady, letting performance drive the scene.".to_string()
    } else if lower.contains("dolly") {
        "Smooth dolly movement adds dimensional depth to the composition.".to_string()
    } else if lower.contains("handheld") {
        "Handheld camera work creates intimate, documentary-style immediacy.".to_string()
    } else {
        format!("Camera employs {movement} to enhance visual storytelling.")
    }
}

fn composition(source: &PromptSource<'_>, cast: &[CastMember]) -> String {
    let camera = &source.notes.camera;
    let framing = if camera.framing.is_empty() {
        "balanced framing"
    } else {
        camera.framing.as_str()
    };
    let mut parts = vec![format!("Composition features {framing}")];
    match cast.len() {
        0 => {}
        1 => parts.push("with single subject prominence".to_string()),
        2 => parts.push("balancing two-shot dynamics".to_string()),
        _ => parts.push("orchestrating ensemble staging".to_string()),
    }
    let depth = camera.depth_of_field.to_lowercase();
    if depth.contains("shallow") {
        parts.push("Shallow focus isolates subjects".to_string());
    } else if depth.contains("deep") {
        parts.push("Deep focus reveals layered space".to_string());
    }
    sentences(&parts)
}

fn ambiance(source: &PromptSource<'_>) -> String {
    let time = source.scene.time_of_day.to_uppercase();
    let mood = match source.notes.lighting.mood.as_str() {
        "" => "neutral",
        mood => mood,
    };
    let mut parts = vec![
        if time.contains("NIGHT") {
            "Nocturnal atmosphere"
        } else if time.contains("DAWN") {
            "Dawn's quiet anticipation"
        } else if time.contains("DUSK") {
            "Golden hour magic"
        } else {
            "Daylight clarity"
        }
        .to_string(),
        format!("creates {mood} mood"),
    ];
    let ambience = &source.notes.sound.ambience;
    if !ambience.is_empty() {
        let heard: Vec<&str> = ambience.iter().take(2).map(String::as_str).collect();
        parts.push(format!("with {}", heard.join(", ")));
    }
    sentences(&parts)
}

fn texture(source: &PromptSource<'_>, cast: &[CastMember]) -> String {
    let mut parts: Vec<String> = if source.heading_is_interior() {
        vec!["Interior surfaces".into(), "furniture textures".into()]
    } else {
        vec!["Natural textures".into(), "environmental materials".into()]
    };
    for member in cast.iter().take(2) {
        if !member.wardrobe.is_empty() {
            parts.push(format!("{}'s {}", member.name, member.wardrobe));
        }
    }
    parts.push(format!("{} light quality", source.intensity()));
    parts.truncate(MAX_TEXTURES);
    format!("{}.", parts.join(", "))
}

fn environment(source: &PromptSource<'_>) -> String {
    let location = source.location();
    let mut parts = vec![
        if source.heading_is_interior() {
            format!("Interior {location}")
        } else {
            format!("Exterior {location}")
        },
        format!("during {}", source.time_of_day()),
    ];
    match source.scene.scene_type {
        SceneType::Flashback => parts.push("(memory sequence)".to_string()),
        SceneType::Dream => parts.push("(dream state)".to_string()),
        SceneType::Present | SceneType::Montage => {}
    }
    parts.push("provides narrative setting".to_string());
    sentences(&parts)
}
