//! Sequencer configuration.
//!
//! [`SequencerConfig`] keeps the whole wire contract with the entrypoint
//! helper in one immutable record. The defaults are the pinned values from
//! [`crate::constants`]; a YAML file can override individual fields.
//!
//! ```yaml
//! initContainerName: my-prepare
//! annotationKey: example.com/sequential
//! ```

use crate::constants::{
    ANNOTATION_KEY, ANNOTATION_VALUE, BIN_MOUNT_PATH, ENTRYPOINT_IMAGE, ENTRYPOINT_IMAGE_BINARY,
    PREPARE_INIT_CONTAINER_NAME, RUN_MOUNT_ROOT, STEPS_MOUNT_PATH, VOLUME_PREFIX,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum size of a configuration file (64 KiB).
pub const MAX_CONFIG_SIZE: u64 = 64 * 1024;

/// Fixed names, paths and image used by the rewrite engine and the status
/// interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SequencerConfig {
    /// Name of the synchronization init container.
    pub init_container_name: String,
    /// Entrypoint helper image reference (pinned by digest).
    pub entrypoint_image: String,
    /// Path of the helper binary inside `entrypoint_image`.
    pub entrypoint_image_binary: String,
    /// Annotation key marking converted objects.
    pub annotation_key: String,
    /// Annotation value marking converted objects.
    pub annotation_value: String,
    /// Prefix of every added volume name.
    pub volume_prefix: String,
    /// Mount path of the helper binary volume.
    pub bin_mount_path: String,
    /// Mount path of the steps volume.
    pub steps_mount_path: String,
    /// Root of the per-step signal directories.
    pub run_mount_root: String,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            init_container_name: PREPARE_INIT_CONTAINER_NAME.to_string(),
            entrypoint_image: ENTRYPOINT_IMAGE.to_string(),
            entrypoint_image_binary: ENTRYPOINT_IMAGE_BINARY.to_string(),
            annotation_key: ANNOTATION_KEY.to_string(),
            annotation_value: ANNOTATION_VALUE.to_string(),
            volume_prefix: VOLUME_PREFIX.to_string(),
            bin_mount_path: BIN_MOUNT_PATH.to_string(),
            steps_mount_path: STEPS_MOUNT_PATH.to_string(),
            run_mount_root: RUN_MOUNT_ROOT.to_string(),
        }
    }
}

impl SequencerConfig {
    /// Parses a config from YAML. Missing fields keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidInput(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// - File missing or unreadable
    /// - File exceeds `MAX_CONFIG_SIZE`
    /// - YAML parsing or validation fails
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        if size > MAX_CONFIG_SIZE {
            return Err(Error::InvalidInput(format!(
                "config {} is {} bytes (max {})",
                path.display(),
                size,
                MAX_CONFIG_SIZE
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "loaded sequencer config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("initContainerName", &self.init_container_name),
            ("entrypointImage", &self.entrypoint_image),
            ("entrypointImageBinary", &self.entrypoint_image_binary),
            ("annotationKey", &self.annotation_key),
            ("annotationValue", &self.annotation_value),
            ("volumePrefix", &self.volume_prefix),
            ("binMountPath", &self.bin_mount_path),
            ("stepsMountPath", &self.steps_mount_path),
            ("runMountRoot", &self.run_mount_root),
        ];
        for (field, value) in fields {
            if value.is_empty() {
                return Err(Error::InvalidInput(format!("config field '{field}' is empty")));
            }
        }

        for (field, path) in [
            ("binMountPath", &self.bin_mount_path),
            ("stepsMountPath", &self.steps_mount_path),
            ("runMountRoot", &self.run_mount_root),
        ] {
            if !path.starts_with('/') {
                return Err(Error::InvalidInput(format!(
                    "config field '{field}' must be an absolute path: {path}"
                )));
            }
        }

        Ok(())
    }

    // =========================================================================
    // Derived Names
    // =========================================================================

    /// Name of the volume holding the helper binary.
    pub fn bin_volume(&self) -> String {
        format!("{}-bin", self.volume_prefix)
    }

    /// Name of the steps volume.
    pub fn steps_volume(&self) -> String {
        format!("{}-steps", self.volume_prefix)
    }

    /// Name of the signal volume for step `index`.
    pub fn run_volume(&self, index: usize) -> String {
        format!("{}-run-{}", self.volume_prefix, index)
    }

    /// Mount path of the signal directory for step `index`.
    pub fn run_mount_path(&self, index: usize) -> String {
        format!("{}/{}", self.run_mount_root.trim_end_matches('/'), index)
    }

    /// File posted by step `index` once it completes.
    pub fn post_file(&self, index: usize) -> String {
        format!("{}/out", self.run_mount_path(index))
    }

    /// Metadata directory of step `index`.
    pub fn step_metadata_dir(&self, index: usize) -> String {
        format!("{}/status", self.run_mount_path(index))
    }

    /// Path of the helper binary once staged into the bin volume.
    pub fn staged_entrypoint(&self) -> String {
        format!("{}/entrypoint", self.bin_mount_path.trim_end_matches('/'))
    }
}
