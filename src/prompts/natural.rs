use super::{render_sections, sentences, PromptSource};
use crate::screenplay::SceneType;
use crate::util::{capitalize, truncate_chars};

pub const NATURAL_DIR: &str = "Veo3_Natural_Prompts";
pub const NATURAL_MASTER_FILE: &str = "ALL_VEO3_PROMPTS.txt";

const MAX_TEXTURES: usize = 5;

/// Nine-section natural-language prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NaturalPrompt {
    pub subject: String,
    pub context: String,
    pub action: String,
    pub style: String,
    pub camera_motion: String,
    pub composition: String,
    pub ambiance: String,
    pub texture: String,
    pub environment: String,
}

impl NaturalPrompt {
    pub fn to_text(&self) -> String {
        render_sections(&[
            ("Subject", self.subject.as_str()),
            ("Context", self.context.as_str()),
            ("Action", self.action.as_str()),
            ("Style", self.style.as_str()),
            ("Camera Motion", self.camera_motion.as_str()),
            ("Composition", self.composition.as_str()),
            ("Ambiance", self.ambiance.as_str()),
            ("Texture", self.texture.as_str()),
            ("Environment", self.environment.as_str()),
        ])
    }
}

pub fn natural_prompt(source: &PromptSource<'_>) -> NaturalPrompt {
    NaturalPrompt {
        subject: subject(source),
        context: context(source),
        action: action(source),
        style: style(source),
        camera_motion: camera_motion(source),
        composition: composition(source),
        ambiance: ambiance(source),
        texture: texture(source),
        environment: environment(source),
    }
}

/// Sorted `(stem, text)` pairs concatenated into `ALL_VEO3_PROMPTS.txt`.
pub fn master_file(entries: &[(String, String)]) -> String {
    entries
        .iter()
        .map(|(stem, text)| format!("=== {stem} ===\n\n{text}\n"))
        .collect::<Vec<_>>()
        .join(&format!("\n{}\n", "=".repeat(60)))
}

fn time_mood(time_of_day: &str) -> &'static str {
    const MOODS: [(&str, &str); 8] = [
        ("DAWN", "serene"),
        ("MORNING", "fresh"),
        ("DAY", "vibrant"),
        ("AFTERNOON", "warm"),
        ("DUSK", "golden"),
        ("SUNSET", "romantic"),
        ("LATE NIGHT", "intimate"),
        ("NIGHT", "mysterious"),
    ];
    let upper = time_of_day.to_uppercase();
    MOODS
        .iter()
        .find(|(key, _)| upper.contains(key))
        .map(|(_, mood)| *mood)
        .unwrap_or("atmospheric")
}

fn subject(source: &PromptSource<'_>) -> String {
    let characters = source.characters();
    let mut parts = Vec::new();
    let shot_type = source.shot_type().to_uppercase();
    if shot_type.contains("ESTABLISHING") {
        parts.push("An establishing view of".to_string());
    } else if shot_type.contains("CLOSE") {
        parts.push("An intimate close-up of".to_string());
    }

    let location = source.location();
    if characters.is_empty() {
        parts.push(format!("A {} {location}", time_mood(source.time_of_day())));
    } else {
        let names: Vec<&str> = characters
            .iter()
            .take(2)
            .map(|note| note.name.as_str())
            .collect();
        parts.push(names.join(" and "));
        let states: Vec<&str> = characters
            .iter()
            .map(|note| note.emotional_state.as_str())
            .filter(|state| !state.is_empty())
            .take(2)
            .collect();
        if !states.is_empty() {
            parts.push(format!("displaying {}", states.join(", ")));
        }
        parts.push(format!("in a {location}"));
    }
    format!("{}.", parts.join(" "))
}

fn context(source: &PromptSource<'_>) -> String {
    let environment = &source.notes.environment;
    let location = source.location();
    let upper = location.to_uppercase();
    let opening = if environment.setting_description.is_empty() {
        format!("The {location} is")
    } else {
        environment.setting_description.clone()
    };
    let setting = if source.heading_is_interior() {
        let furnishings = if upper.contains("OFFICE") {
            "a desk, computer equipment, and professional furnishings"
        } else if upper.contains("COFFEE") || upper.contains("CAFE") {
            "tables, chairs, a counter, and the bustle of patrons"
        } else if upper.contains("HOME") || upper.contains("APARTMENT") {
            "personal furnishings and lived-in details"
        } else {
            "appropriate furnishings and architectural details"
        };
        format!("an interior space with {furnishings}")
    } else {
        format!("an exterior location featuring {}", exterior_features(&upper))
    };
    let mut parts = vec![format!("{opening} {setting}")];

    let sources = source.notes.lighting.sources.join(" ").to_lowercase();
    if sources.contains("natural") {
        parts.push("Natural light streams through windows".to_string());
    } else if sources.contains("practical") {
        parts.push("Practical lights provide warm illumination".to_string());
    }
    if source.scene.scene_type == SceneType::Flashback {
        parts.push("The scene has a nostalgic, memory-like quality".to_string());
    }
    let conditions = environment.environmental_conditions.as_str();
    if !conditions.is_empty() && conditions != "normal" {
        parts.push(format!(
            "{} conditions affect the atmosphere",
            capitalize(conditions)
        ));
    }
    sentences(&parts)
}

fn exterior_features(location_upper: &str) -> &'static str {
    if location_upper.contains("STREET") {
        "urban architecture, sidewalks, and city life"
    } else if location_upper.contains("PARK") {
        "natural landscaping, paths, and open spaces"
    } else if location_upper.contains("BEACH") {
        "sand, waves, and coastal elements"
    } else if location_upper.contains("FOREST") || location_upper.contains("WOODS") {
        "trees, undergrowth, and natural paths"
    } else if location_upper.contains("FARM") {
        "fields, farm buildings, and rural landscape"
    } else {
        "natural and architectural elements"
    }
}

fn action(source: &PromptSource<'_>) -> String {
    let shot = source.shot;
    let mut parts = Vec::new();
    if !shot.description.is_empty() {
        parts.push(truncate_chars(&shot.description, 200));
    }
    for note in source.characters().iter().take(2) {
        if !note.movement.is_empty() && note.movement != "static" {
            parts.push(format!("{} {}", note.name, note.movement));
        }
    }
    match shot.dialogue.len() {
        0 => {}
        1 => parts.push("A character speaks".to_string()),
        _ => parts.push("Characters engage in conversation".to_string()),
    }

    let time = source.time_of_day().to_uppercase();
    let ambient_motion = if time.contains("DAWN") || time.contains("MORNING") {
        "Morning light gradually illuminates the space"
    } else if time.contains("DUSK") || time.contains("SUNSET") {
        "Golden hour light shifts across surfaces"
    } else if time.contains("NIGHT") {
        "Artificial lights create pools of illumination"
    } else if source.scene.heading.contains("EXT") {
        "Gentle breeze moves through the scene"
    } else {
        "Dust particles drift in the light"
    };
    parts.push(ambient_motion.to_string());
    sentences(&parts)
}

fn style(source: &PromptSource<'_>) -> String {
    let scene_type = source.scene.scene_type;
    let mood = source.mood().to_lowercase();
    let treatment = match scene_type {
        SceneType::Flashback => "Nostalgic cinematography with slightly desaturated colors",
        SceneType::Dream => "Dreamlike, ethereal quality with soft focus edges",
        SceneType::Montage => "Dynamic, rhythmic editing style",
        SceneType::Present if mood.contains("dramatic") => {
            "Dramatic cinematography with strong contrast"
        }
        SceneType::Present if mood.contains("romantic") => "Soft, romantic visual treatment",
        SceneType::Present if mood.contains("tense") || mood.contains("thriller") => {
            "Thriller-style cinematography with sharp shadows"
        }
        SceneType::Present => "Naturalistic cinematography with authentic lighting",
    };
    let grading = match source.color_temperature().chars().next() {
        Some('3') => "warm color grading",
        Some('6') => "cool color grading",
        _ => "neutral color balance",
    };
    let finish = if scene_type == SceneType::Flashback {
        "subtle film grain"
    } else {
        "clean digital aesthetic"
    };
    sentences(&[
        treatment.to_string(),
        grading.to_string(),
        finish.to_string(),
        format!("The overall style is {}", source.atmosphere()),
    ])
}

fn camera_motion(source: &PromptSource<'_>) -> String {
    let movement = source.camera_movement().to_lowercase();
    let (opening, detail) = if source.shot_type().to_uppercase().contains("ESTABLISHING") {
        (
            "A slow, majestic crane shot descends from above",
            "gradually revealing the full scope of the location",
        )
    } else if movement.contains("static") || movement.contains("locked") {
        (
            "The camera holds steady in a locked-off position",
            "allowing the action to unfold within the frame",
        )
    } else if movement.contains("dolly") {
        let direction = if movement.contains("in") {
            "slowly toward the subject"
        } else if movement.contains("out") {
            "gradually away from the subject"
        } else {
            "laterally across the scene"
        };
        ("A smooth dolly movement glides", direction)
    } else if movement.contains("handheld") {
        (
            "Handheld camera work adds organic movement",
            "creating an intimate, documentary feel",
        )
    } else if movement.contains("steadicam") {
        (
            "Steadicam movement flows smoothly through the space",
            "maintaining stability while following the action",
        )
    } else if movement.contains("pan") {
        (
            "The camera pans smoothly",
            "surveying the scene from a fixed position",
        )
    } else if movement.contains("tilt") {
        (
            "A gentle tilt reveals",
            "vertical elements of the composition",
        )
    } else if movement.contains("crane") {
        (
            "A crane movement lifts the perspective",
            "providing a godlike view of the action",
        )
    } else {
        (
            "The camera employs subtle movement",
            "maintaining visual interest without distraction",
        )
    };
    let mut parts = vec![opening.to_string(), detail.to_string()];
    let duration = source.shot.duration.as_str();
    if duration.starts_with("2-") {
        parts.push("The movement is brief and purposeful".to_string());
    } else if duration.starts_with("5-") || duration.starts_with("8-") {
        parts.push(
            "The movement unfolds leisurely, allowing viewers to absorb details".to_string(),
        );
    }
    sentences(&parts)
}

fn composition(source: &PromptSource<'_>) -> String {
    let camera = &source.notes.camera;
    let rule = camera.composition.to_lowercase();
    let mut parts = vec![if rule.contains("rule of thirds") {
        "The composition follows the rule of thirds"
    } else if rule.contains("center") {
        "The subject is center-framed"
    } else if rule.contains("golden") {
        "The composition uses golden ratio proportions"
    } else {
        "The frame is thoughtfully composed"
    }
    .to_string()];

    match source.characters() {
        [] => {}
        [only] => parts.push(format!("with {} positioned as the focal point", only.name)),
        [_, _] => parts.push("balancing both characters in the frame".to_string()),
        _ => parts.push("arranging multiple characters in dynamic groupings".to_string()),
    }
    let props = &source.notes.environment.props;
    if !props.is_empty() {
        let shown: Vec<&str> = props.iter().take(2).map(String::as_str).collect();
        parts.push(format!(
            "Environmental elements like {} add visual layers",
            shown.join(", ")
        ));
    }
    let depth = camera.depth_of_field.to_lowercase();
    if depth.contains("shallow") {
        parts.push("Shallow depth of field isolates the subject from the background".to_string());
    } else if depth.contains("deep") {
        parts.push("Deep focus keeps all planes sharp, revealing environmental detail".to_string());
    }
    let location = source.location().to_uppercase();
    if location.contains("STREET") || location.contains("ROAD") {
        parts.push("Street lines create strong perspective".to_string());
    } else if location.contains("OFFICE") {
        parts.push("Architectural lines frame the subjects".to_string());
    }
    sentences(&parts)
}

fn ambiance(source: &PromptSource<'_>) -> String {
    let time = source.scene.time_of_day.to_uppercase();
    let mood = source.mood().to_lowercase();
    let mut parts = vec![if time.contains("NIGHT") {
        "Nocturnal quietude pervades the scene"
    } else if time.contains("DAWN") || time.contains("MORNING") {
        "Early morning freshness fills the space"
    } else if time.contains("DUSK") || time.contains("SUNSET") {
        "Golden hour warmth bathes everything"
    } else {
        "Daylight brings clarity and energy"
    }
    .to_string()];
    parts.push(
        if mood.contains("tense") {
            "Tension hangs in the air"
        } else if mood.contains("romantic") {
            "Romance softens every edge"
        } else if mood.contains("mysterious") {
            "Mystery shrouds the atmosphere"
        } else if mood.contains("melancholic") {
            "Melancholy permeates the moment"
        } else {
            "The mood is contemplative and grounded"
        }
        .to_string(),
    );
    let ambience = &source.notes.sound.ambience;
    if !ambience.is_empty() {
        let heard: Vec<&str> = ambience.iter().take(2).map(String::as_str).collect();
        parts.push(format!("The soundscape includes {}", heard.join(", ")));
    }
    parts.push(
        match source.scene.scene_type {
            SceneType::Flashback => "Everything feels distant yet vivid, like a memory",
            SceneType::Dream => "Reality feels fluid and symbolic",
            SceneType::Present | SceneType::Montage => "The space feels authentic and lived-in",
        }
        .to_string(),
    );
    sentences(&parts)
}

fn texture(source: &PromptSource<'_>) -> String {
    let environment = &source.notes.environment;
    let mut parts: Vec<String> = if source.heading_is_interior() {
        vec![
            "Smooth painted walls".into(),
            "polished wood surfaces".into(),
            "soft fabric upholstery".into(),
        ]
    } else {
        vec![
            "Weathered concrete".into(),
            "rough stone".into(),
            "natural foliage".into(),
        ]
    };
    let intensity = source.intensity().to_lowercase();
    parts.push(
        if intensity.contains("soft") {
            "diffused light creating gentle gradients"
        } else if intensity.contains("harsh") {
            "hard light creating sharp shadow edges"
        } else {
            "balanced light revealing surface details"
        }
        .to_string(),
    );
    let wardrobe: Vec<&str> = source
        .characters()
        .iter()
        .take(2)
        .map(|note| note.wardrobe.as_str())
        .filter(|wardrobe| !wardrobe.is_empty())
        .collect();
    if !wardrobe.is_empty() {
        parts.push(format!(
            "clothing textures including {}",
            wardrobe.join(", ")
        ));
    }
    let props = environment.props.join(" ").to_lowercase();
    if props.contains("glass") {
        parts.push("reflective glass surfaces".to_string());
    }
    if props.contains("metal") {
        parts.push("brushed metal accents".to_string());
    }
    if props.contains("plant") || props.contains("flower") {
        parts.push("organic plant textures".to_string());
    }
    let conditions = environment.environmental_conditions.to_lowercase();
    parts.push(
        if conditions.contains("rain") {
            "water droplets on surfaces"
        } else if conditions.contains("fog") {
            "misty air softening edges"
        } else if conditions.contains("snow") {
            "crystalline snow accumulation"
        } else {
            "dust motes visible in light beams"
        }
        .to_string(),
    );
    parts.truncate(MAX_TEXTURES);
    format!("{}.", parts.join(", "))
}

fn environment(source: &PromptSource<'_>) -> String {
    let location = source.location().to_lowercase();
    let mut parts = Vec::new();
    if source.heading_is_interior() {
        parts.push(format!("An interior {location}"));
    } else {
        parts.push(format!("An exterior {location} setting"));
    }
    parts.push(format!("during {}", source.time_of_day().to_lowercase()));
    let setting = if location.contains("farmhouse") || location.contains("rural") {
        Some("in a rural, working-class setting")
    } else if location.contains("office") || location.contains("corporate") {
        Some("in a professional, urban environment")
    } else if location.contains("home") || location.contains("apartment") {
        Some("in a middle-class residential space")
    } else if location.contains("coffee") || location.contains("cafe") {
        Some("in a public social space")
    } else {
        None
    };
    parts.extend(setting.map(str::to_string));

    parts.push("The space embodies".to_string());
    let description = source.notes.environment.setting_description.to_lowercase();
    parts.push(
        if description.is_empty() {
            "authentic environmental storytelling"
        } else if description.contains("modern") {
            "contemporary design sensibilities"
        } else if description.contains("vintage") || description.contains("old") {
            "timeworn character"
        } else {
            "functional simplicity"
        }
        .to_string(),
    );
    parts.push(
        if source.scene.scene_type == SceneType::Flashback {
            "frozen in memory"
        } else {
            "where life unfolds naturally"
        }
        .to_string(),
    );
    parts.push("Every detail contributes to the narrative".to_string());
    sentences(&parts)
}
