//! Tests for sequencer configuration loading.

use podseq::{Error, SequencerConfig};
use std::io::Write;

#[test]
fn test_default_matches_constants() {
    let config = SequencerConfig::default();

    assert_eq!(config.init_container_name, podseq::PREPARE_INIT_CONTAINER_NAME);
    assert_eq!(config.entrypoint_image, podseq::ENTRYPOINT_IMAGE);
    assert_eq!(config.annotation_key, podseq::ANNOTATION_KEY);
    assert_eq!(config.annotation_value, podseq::ANNOTATION_VALUE);
    assert_eq!(config.bin_mount_path, podseq::BIN_MOUNT_PATH);
    assert_eq!(config.steps_mount_path, podseq::STEPS_MOUNT_PATH);
    assert_eq!(config.run_mount_root, podseq::RUN_MOUNT_ROOT);
}

#[test]
fn test_partial_yaml_keeps_defaults() {
    let config = SequencerConfig::from_yaml("initContainerName: my-prepare\n").expect("should parse");

    assert_eq!(config.init_container_name, "my-prepare");
    assert_eq!(config.entrypoint_image, podseq::ENTRYPOINT_IMAGE);
}

#[test]
fn test_empty_yaml_is_default() {
    assert_eq!(
        SequencerConfig::from_yaml("\n").expect("should parse"),
        SequencerConfig::default()
    );
}

#[test]
fn test_unknown_field_rejected() {
    let result = SequencerConfig::from_yaml("initContainer: typo\n");

    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "annotationKey: example.com/ordered").expect("write");
    writeln!(file, "volumePrefix: sync").expect("write");

    let config = SequencerConfig::load(file.path()).expect("should load");

    assert_eq!(config.annotation_key, "example.com/ordered");
    assert_eq!(config.run_volume(0), "sync-run-0");
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");

    let result = SequencerConfig::load(dir.path().join("absent.yaml"));

    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_load_oversized_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    let padding = "#".repeat(podseq::config::MAX_CONFIG_SIZE as usize + 1);
    file.write_all(padding.as_bytes()).expect("write");

    let result = SequencerConfig::load(file.path());

    assert!(matches!(result, Err(Error::InvalidInput(ref msg)) if msg.contains("max")));
}

#[test]
fn test_config_round_trips_through_yaml() {
    let config = SequencerConfig {
        init_container_name: "custom".to_string(),
        ..SequencerConfig::default()
    };

    let yaml = serde_yaml::to_string(&config).expect("serialize");

    assert!(yaml.contains("initContainerName: custom"));
    assert_eq!(SequencerConfig::from_yaml(&yaml).expect("parse"), config);
}
