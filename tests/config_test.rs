//! Integration tests for Settings loading from an explicit config file.
//!
//! These tests do not write a global config; they only layer a temp file over
//! whatever the environment provides.

use std::fs;

use tempfile::TempDir;

use citynet::config::{OutputFormat, Settings};
use citynet::domain::DuplicateCityPolicy;

#[test]
fn given_explicit_config_when_loading_then_file_values_apply() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("citynet.toml");
    fs::write(
        &path,
        r#"
duplicate_cities = "replace"
output = "json"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.duplicate_cities, DuplicateCityPolicy::Replace);
    assert_eq!(settings.output, OutputFormat::Json);
}

#[test]
fn given_missing_config_file_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn given_malformed_config_when_loading_then_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "duplicate_cities = \"merge\"\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_template_when_written_and_loaded_then_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("citynet.toml");
    fs::write(&path, Settings::template()).unwrap();

    assert!(Settings::load(Some(&path)).is_ok());
}
