use super::*;

fn write(root: &Path, text: &str) {
    fs::write(root.join(CONFIG_FILE), text).unwrap();
}

#[test]
fn written_defaults_round_trip_through_load() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &default_config()).unwrap();
    let config = load_config(dir.path()).unwrap();
    assert_eq!(config, default_config());
    assert_eq!(
        config.platforms,
        vec![Platform::Veo3, Platform::Runway, Platform::Pika]
    );
}

#[test]
fn minimal_config_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        r#"{"schema_version": 1, "backend": "lm", "platforms": ["haiper"]}"#,
    );
    let config = load_config(dir.path()).unwrap();
    assert_eq!(config.backend, BackendKind::Lm);
    assert_eq!(config.platforms, vec![Platform::Haiper]);
    assert_eq!(config.scripts_dir, "scripts");
    assert_eq!(config.vignette, VignetteRules::default());
}

#[test]
fn missing_config_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        load_config_or_default(dir.path()).unwrap(),
        default_config()
    );
}

#[test]
fn unknown_platform_is_rejected_at_parse_time() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        r#"{"schema_version": 1, "platforms": ["sora"]}"#,
    );
    let err = load_config(dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("parse config"));
}

#[test]
fn validation_catches_bad_values() {
    let mut config = default_config();
    config.schema_version = 2;
    assert!(validate_config(&config)
        .unwrap_err()
        .to_string()
        .contains("schema_version"));

    let mut config = default_config();
    config.output_dir = "../elsewhere".to_string();
    assert!(validate_config(&config)
        .unwrap_err()
        .to_string()
        .contains("output_dir"));

    let mut config = default_config();
    config.platforms = vec![Platform::Pika, Platform::Pika];
    assert!(validate_config(&config)
        .unwrap_err()
        .to_string()
        .contains("listed twice"));

    let mut config = default_config();
    config
        .characters
        .aliases
        .insert("Doc".to_string(), "Dr. Roy".to_string());
    assert!(validate_config(&config).is_err());

    let mut config = default_config();
    config.lm_command = Some("   ".to_string());
    assert!(validate_config(&config).is_err());
}

#[test]
fn character_profiles_load_from_json() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        r#"{
  "schema_version": 1,
  "characters": {
    "profiles": {
      "Michael": {"age": "62", "gender": "male", "wardrobe_style": "work clothes"}
    },
    "aliases": {"MIKE": "Michael"}
  }
}"#,
    );
    let config = load_config(dir.path()).unwrap();
    let registry = character_registry(&config).unwrap();
    assert_eq!(
        registry.describe("MIKE", 1),
        "Michael, 62, male, wearing work clothes"
    );
}
