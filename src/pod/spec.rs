//! Pod specification types.
//!
//! Kubernetes-compatible container and pod spec types with serde mappings
//! that follow the API's camelCase field names. Only the fields the
//! converter reads or writes are typed; everything else is kept in each
//! struct's flattened `extra` mapping so it survives a decode/encode cycle.
//!
//! # Supported Formats
//!
//! - **YAML**: Primary format, parsed via `serde_yaml`
//! - **JSON**: Also supported (YAML is a superset of JSON)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

// =============================================================================
// Pod Specification
// =============================================================================

/// Pod specification.
///
/// Init containers run to completion one after another before any regular
/// container starts. Regular containers all start together unless the spec
/// was converted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    /// Init containers, in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub init_containers: Vec<ContainerSpec>,
    /// Regular containers, in declared order.
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
    /// Volume definitions for the pod.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
    /// Restart policy (`Always`, `OnFailure`, `Never`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<String>,
    /// Fields not interpreted by the converter.
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

impl PodSpec {
    /// Names of every declared container: init containers first, then
    /// regular containers, each in declared order.
    pub fn container_names(&self) -> impl Iterator<Item = &str> {
        self.init_containers
            .iter()
            .chain(self.containers.iter())
            .map(|c| c.name.as_str())
    }
}

// =============================================================================
// Container Specification
// =============================================================================

/// Container specification.
///
/// Identity is the name, which is unique within a pod.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    /// Container name (unique within pod).
    pub name: String,
    /// Image reference (e.g., "alpine", "ghcr.io/user/app:v1").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Overrides the image's entrypoint. Empty means "use the image's".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    /// Arguments to the entrypoint.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Working directory inside the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    /// Resource requests and limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
    /// Volume mount points, in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,
    /// Fields not interpreted by the converter (env, ports, probes, ...).
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

impl ContainerSpec {
    /// Creates a container with a name, image and command.
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        command: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            image: Some(image.into()),
            command: command.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Returns true if the container overrides the image entrypoint.
    pub fn has_command(&self) -> bool {
        !self.command.is_empty()
    }
}

// =============================================================================
// Resources
// =============================================================================

/// Resource requests and limits for a container.
///
/// Quantities are kept verbatim; the converter never alters them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    /// Requested resources (e.g. `cpu: 200m`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requests: BTreeMap<String, Quantity>,
    /// Resource limits (e.g. `memory: 100M`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub limits: BTreeMap<String, Quantity>,
    /// Fields not interpreted by the converter (claims, ...).
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

/// A Kubernetes resource quantity such as `50m`, `100M` or `1`.
///
/// Manifests write quantities either as strings or bare numbers; both
/// decode into the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(pub String);

impl Quantity {
    /// Returns the quantity as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Quantity(s),
            Raw::Int(i) => Quantity(i.to_string()),
            Raw::Float(f) => Quantity(f.to_string()),
        })
    }
}

// =============================================================================
// Volumes
// =============================================================================

/// Volume mount specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    /// Name of the volume to mount.
    pub name: String,
    /// Path inside the container to mount at.
    pub mount_path: String,
    /// If true, mount as read-only.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    /// Fields not interpreted by the converter (subPath, ...).
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

impl VolumeMount {
    /// Creates a read-write mount.
    pub fn new(name: impl Into<String>, mount_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mount_path: mount_path.into(),
            ..Self::default()
        }
    }

    /// Creates a read-only mount.
    pub fn read_only(name: impl Into<String>, mount_path: impl Into<String>) -> Self {
        Self {
            read_only: true,
            ..Self::new(name, mount_path)
        }
    }
}

/// Pod volume definition.
///
/// Only `emptyDir` is typed; any other source (`hostPath`, `configMap`,
/// `secret`, ...) is carried in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Volume name (referenced by volume mounts).
    pub name: String,
    /// Empty directory source (ephemeral, pod-scoped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_dir: Option<EmptyDirVolumeSource>,
    /// Other volume sources.
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

impl Volume {
    /// Creates an `emptyDir` volume.
    pub fn empty_dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            empty_dir: Some(EmptyDirVolumeSource::default()),
            extra: serde_yaml::Mapping::new(),
        }
    }

    /// Returns true if this is an `emptyDir` volume.
    pub fn is_empty_dir(&self) -> bool {
        self.empty_dir.is_some()
    }
}

/// `emptyDir` volume source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyDirVolumeSource {
    /// Storage medium (`""` or `Memory`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    /// Maximum size of the directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<Quantity>,
}
