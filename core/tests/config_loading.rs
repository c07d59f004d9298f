use clausemark_core::config::CoreConfig;
use clausemark_core::error::CoreError;
use clausemark_core::masking::MaskingProfile;
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clausemark.json");
    fs::write(
        &path,
        r#"{"highlight": {"min_target_chars": 10, "label_separator": "|"}, "masking_profile": "STRICT"}"#,
    )
    .unwrap();

    let config = CoreConfig::load_from_path(&path).unwrap();
    assert_eq!(config.highlight.min_target_chars, 10);
    assert_eq!(config.highlight.label_separator, '|');
    assert_eq!(config.masking_profile, MaskingProfile::Strict);
}

#[test]
fn empty_object_is_the_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, "{}").unwrap();
    assert_eq!(CoreConfig::load_from_path(&path).unwrap(), CoreConfig::default());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = CoreConfig::load_from_path(dir.path().join("absent.json"));
    assert!(matches!(result, Err(CoreError::Io(_))));
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"highlight": {"label_separator": " "}}"#).unwrap();
    assert!(matches!(
        CoreConfig::load_from_path(&path),
        Err(CoreError::InvalidInput(_))
    ));

    fs::write(&path, r#"{"masking_profile": "PARANOID"}"#).unwrap();
    assert!(matches!(CoreConfig::load_from_path(&path), Err(CoreError::Json(_))));
}
