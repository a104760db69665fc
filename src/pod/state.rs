//! Pod state types.
//!
//! This module defines the read-side status types for pods:
//! - `PodPhase`: High-level pod lifecycle state
//! - `PodStatus`: Phase plus init and regular container statuses
//! - `ContainerStatus`: Per-container state as reported by the kubelet
//!
//! The API server reports container statuses sorted by name, not in the
//! order containers were declared. Callers that need declared order must
//! recover it from the pod spec.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Pod Phase
// =============================================================================

/// High-level pod lifecycle phase.
///
/// ```text
///   Pending ──▶ Running ──▶ Succeeded
///      │           │
///      └───────────┴──────▶ Failed
/// ```
///
/// Phases this crate does not know about (including the empty string) are
/// kept verbatim in `Other` so they survive decoding and can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PodPhase {
    /// Accepted, but not every container is running yet.
    Pending,
    /// Bound to a node and at least one container is running.
    Running,
    /// All containers terminated successfully.
    Succeeded,
    /// All containers terminated, at least one in failure.
    Failed,
    /// State could not be obtained.
    Unknown,
    /// Any other reported phase.
    Other(String),
}

impl PodPhase {
    /// Returns the phase as reported by the API server.
    pub fn as_str(&self) -> &str {
        match self {
            PodPhase::Pending => "Pending",
            PodPhase::Running => "Running",
            PodPhase::Succeeded => "Succeeded",
            PodPhase::Failed => "Failed",
            PodPhase::Unknown => "Unknown",
            PodPhase::Other(phase) => phase,
        }
    }
}

impl From<String> for PodPhase {
    fn from(phase: String) -> Self {
        match phase.as_str() {
            "Pending" => PodPhase::Pending,
            "Running" => PodPhase::Running,
            "Succeeded" => PodPhase::Succeeded,
            "Failed" => PodPhase::Failed,
            "Unknown" => PodPhase::Unknown,
            _ => PodPhase::Other(phase),
        }
    }
}

impl From<PodPhase> for String {
    fn from(phase: PodPhase) -> Self {
        match phase {
            PodPhase::Other(phase) => phase,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PodPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Pod Status
// =============================================================================

/// Observed status of a pod.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodStatus {
    /// High-level phase. Absent on objects that were never scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<PodPhase>,
    /// Init container statuses (API order: sorted by name).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub init_container_statuses: Vec<ContainerStatus>,
    /// Regular container statuses (API order: sorted by name).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub container_statuses: Vec<ContainerStatus>,
    /// Fields not interpreted here (conditions, podIP, ...).
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

// =============================================================================
// Container Status
// =============================================================================

/// Status of a single container within a pod.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStatus {
    /// Container name within the pod.
    pub name: String,
    /// Current state.
    #[serde(default)]
    pub state: ContainerState,
    /// Fields not interpreted here (ready, restartCount, imageID, ...).
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

impl ContainerStatus {
    /// Returns true once the container terminated with a recorded finish time.
    ///
    /// A terminated record without `finishedAt` is not finished yet.
    pub fn is_finished(&self) -> bool {
        self.state
            .terminated
            .as_ref()
            .is_some_and(|t| t.finished_at.is_some())
    }
}

/// Container state. At most one member is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerState {
    /// Container is waiting to start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting: Option<ContainerStateWaiting>,
    /// Container is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running: Option<ContainerStateRunning>,
    /// Container has terminated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminated: Option<ContainerStateTerminated>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStateWaiting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStateRunning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

/// Terminated container record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStateTerminated {
    /// Exit status of the last run.
    #[serde(default)]
    pub exit_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// When the container finished. May be missing on partial records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}
