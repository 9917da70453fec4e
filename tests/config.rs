use filament_resistance::config::{self, Config};
use filament_resistance::{Quantity, Resistivity};

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let cfg = config::load_or_default_at(&path).expect("load");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
}

#[test]
fn saved_settings_are_loaded_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let cfg = Config {
        default_resistivity: Resistivity::Z,
        default_unknown: Quantity::Area,
        language: "ko-kr".into(),
        precision: 2,
        ui_scale: 1.25,
        ..Config::default()
    };
    cfg.save_to(&path).expect("save");
    let loaded = config::load_or_default_at(&path).expect("load");
    assert_eq!(loaded, cfg);
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "default_resistivity = \"Z\"\nwindow_alpha = 0.1\n").expect("write");
    let cfg = config::load_or_default_at(&path).expect("load");
    assert_eq!(cfg.default_resistivity, Resistivity::Z);
    assert_eq!(cfg.default_unknown, Quantity::Resistance);
    assert_eq!(cfg.precision, 4);
    assert!((cfg.window_alpha - 0.3).abs() < f32::EPSILON);
    assert!((cfg.ui_scale - 1.0).abs() < f32::EPSILON);
}

#[test]
fn ui_scale_is_clamped_on_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "ui_scale = 3.0\n").expect("write");
    let cfg = config::load_or_default_at(&path).expect("load");
    assert!((cfg.ui_scale - 1.6).abs() < f32::EPSILON);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "default_unknown = \"Volume\"\n").expect("write");
    assert!(matches!(
        config::load_or_default_at(&path),
        Err(config::ConfigError::Serde(_))
    ));
}
