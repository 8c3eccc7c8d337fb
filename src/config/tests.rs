//! Tests for config functionality.

use crate::config::types::default_image_extensions;
use crate::config::{Config, PathSeparator, StoreKind};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.endpoint, "http://localhost:3000/api/captions");
    assert_eq!(config.store, StoreKind::Http);
    assert_eq!(config.path_separator, PathSeparator::Host);
    assert_eq!(config.image_extensions, default_image_extensions());
    assert!(config.event_log);
    assert_eq!(config.event_log_dir, ".captioner");
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config.store, StoreKind::Http);
    assert_eq!(config.endpoint, "http://localhost:3000/api/captions");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
endpoint: "http://captions.local/api/captions"
store: file
path_separator: windows
image_extensions:
  - png
  - tiff
event_log: false
event_log_dir: logs
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.endpoint, "http://captions.local/api/captions");
    assert_eq!(config.store, StoreKind::File);
    assert_eq!(config.path_separator, PathSeparator::Windows);
    assert_eq!(config.image_extensions, vec!["png", "tiff"]);
    assert!(!config.event_log);
    assert_eq!(config.event_log_dir, "logs");
    assert_eq!(config.separator(), '\\');
}

#[test]
fn test_unknown_fields_are_ignored() {
    let config = Config::from_yaml("future_option: 42\nstore: file\n").unwrap();
    assert_eq!(config.store, StoreKind::File);
}

#[test]
fn test_invalid_store_is_rejected() {
    let err = Config::from_yaml("store: ftp").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_empty_endpoint_rejected_for_http() {
    let err = Config::from_yaml("endpoint: \"\"").unwrap_err();
    assert!(err.to_string().contains("endpoint must be set"));

    // Irrelevant for the file store.
    assert!(Config::from_yaml("endpoint: \"\"\nstore: file").is_ok());
}

#[test]
fn test_leading_dot_extension_rejected() {
    let err = Config::from_yaml("image_extensions: [\".png\"]").unwrap_err();
    assert!(err.to_string().contains("Use 'png' instead"));
}

#[test]
fn test_empty_extension_list_rejected() {
    let err = Config::from_yaml("image_extensions: []").unwrap_err();
    assert!(err.to_string().contains("at least one extension"));
}

#[test]
fn test_empty_event_log_dir_rejected_only_when_enabled() {
    assert!(Config::from_yaml("event_log_dir: \"\"").is_err());
    assert!(Config::from_yaml("event_log_dir: \"\"\nevent_log: false").is_ok());
}

#[test]
fn test_separator_styles() {
    assert_eq!(PathSeparator::Windows.as_char(), '\\');
    assert_eq!(PathSeparator::Posix.as_char(), '/');
    assert_eq!(PathSeparator::Host.as_char(), std::path::MAIN_SEPARATOR);
}

#[test]
fn test_yaml_roundtrip() {
    let mut config = Config::default();
    config.store = StoreKind::File;
    config.path_separator = PathSeparator::Posix;

    let yaml = config.to_yaml().unwrap();
    let parsed = Config::from_yaml(&yaml).unwrap();
    assert_eq!(parsed.store, StoreKind::File);
    assert_eq!(parsed.path_separator, PathSeparator::Posix);
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("captioner.yaml");
    std::fs::write(&path, "store: file\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.store, StoreKind::File);

    let explicit = Config::resolve(Some(&path)).unwrap();
    assert_eq!(explicit.store, StoreKind::File);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load(temp_dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}
