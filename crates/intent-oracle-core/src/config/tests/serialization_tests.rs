//! Serialization and deserialization tests for configuration.

use std::io::Write;

use crate::config::{ArtifactFormat, OracleConfig};

#[test]
fn test_config_serialization_round_trip() {
    let mut config = OracleConfig::default();
    config.entropy.seed = Some(42);
    config.artifact.format = ArtifactFormat::Text;

    let toml_str = toml::to_string(&config).expect("Config must serialize to TOML");
    let restored: OracleConfig =
        toml::from_str(&toml_str).expect("Config must deserialize from TOML");

    assert_eq!(restored.entropy.seed, Some(42));
    assert_eq!(restored.entropy.endpoint, config.entropy.endpoint);
    assert_eq!(restored.artifact.format, ArtifactFormat::Text);
    assert_eq!(restored.crystallize.max_steps, config.crystallize.max_steps);
    assert_eq!(restored.logging.level, config.logging.level);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let toml_str = r#"
        [entropy]
        timeout_ms = 500
        remote_enabled = false
        seed = 7

        [artifact]
        path = "data/glove.txt"
        format = "text"
    "#;

    let config: OracleConfig = toml::from_str(toml_str).expect("Config must parse from TOML");

    assert_eq!(config.entropy.timeout_ms, 500);
    assert!(!config.entropy.remote_enabled);
    assert_eq!(config.entropy.seed, Some(7));
    assert_eq!(config.artifact.path, "data/glove.txt");
    assert_eq!(config.artifact.format, ArtifactFormat::Text);
    // Untouched sections keep their defaults
    assert_eq!(config.synthesis.max_iterations, 75);
    assert_eq!(config.crystallize.max_steps, 32);
}

#[test]
fn test_from_file_validates() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[crystallize]\nmax_steps = 64").unwrap();

    let err = OracleConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("crystallize.max_steps"));
}

#[test]
fn test_from_file_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = OracleConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
