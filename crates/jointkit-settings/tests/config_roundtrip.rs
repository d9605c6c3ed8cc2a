use jointkit_engine::TemplateId;
use jointkit_settings::{Config, SettingsError};
use tempfile::TempDir;

fn tuned() -> Config {
    let mut config = Config::new();
    config.joints.finger_width = Some(14.0);
    config.joints.min_fingers = 5;
    config.layout.max_row_width = 480.0;
    config.layout.holding_tabs = true;
    config.policy.min_pocket_wall = 2.5;
    config.policy.experimental = vec![TemplateId::RotaryLayered, TemplateId::CardShoe];
    config
}

#[test]
fn test_toml_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let config = tuned();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[policy]"));
    assert!(text.contains("card_shoe"));
}

#[test]
fn test_json_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let config = tuned();
    config.save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_partial_file_takes_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[layout]\npadding = 20.0\n").unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.layout.padding, 20.0);
    assert_eq!(loaded.layout.max_row_width, 340.0);
    assert_eq!(loaded.policy, Config::default().policy);
}

#[test]
fn test_save_creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("jointkit").join("config.toml");
    Config::new().save_to_file(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_invalid_file_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[policy]\nbridging_ratio_uniform = -1.0\n").unwrap();

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::Engine(_))
    ));
}

#[test]
fn test_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[layout\npadding = ").unwrap();

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::LoadError(_))
    ));
}

#[test]
fn test_load_or_default_with_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    tuned().save_to_file(&path).unwrap();

    let loaded = Config::load_or_default(Some(&path)).unwrap();
    assert_eq!(loaded.joints.min_fingers, 5);
}
