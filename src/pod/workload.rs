//! Workload objects that embed a pod spec: `Pod`, `Job` and `CronJob`.
//!
//! ```text
//!   Pod      .spec                                  PodSpec
//!   Job      .spec.template.spec                    PodSpec
//!   CronJob  .spec.jobTemplate.spec.template.spec   PodSpec
//! ```
//!
//! Each level with its own `metadata` gets the conversion annotation, so
//! pods created by a converted Job or CronJob are recognisable too.

use super::meta::ObjectMeta;
use super::spec::PodSpec;
use super::state::PodStatus;
use serde::{Deserialize, Serialize};

/// `apiVersion` of core objects.
pub const CORE_V1: &str = "v1";

/// `apiVersion` of batch objects.
pub const BATCH_V1: &str = "batch/v1";

// =============================================================================
// Pod
// =============================================================================

/// A `v1/Pod`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: PodSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PodStatus>,
}

impl Pod {
    /// Creates a pod with the given metadata and spec.
    pub fn new(metadata: ObjectMeta, spec: PodSpec) -> Self {
        Self {
            api_version: CORE_V1.to_string(),
            kind: "Pod".to_string(),
            metadata,
            spec,
            status: None,
        }
    }
}

/// Pod metadata and spec embedded in a controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplateSpec {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: PodSpec,
}

// =============================================================================
// Job
// =============================================================================

/// A `batch/v1/Job`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: JobSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_yaml::Value>,
}

impl Job {
    /// Creates a job with the given metadata and spec.
    pub fn new(metadata: ObjectMeta, spec: JobSpec) -> Self {
        Self {
            api_version: BATCH_V1.to_string(),
            kind: "Job".to_string(),
            metadata,
            spec,
            status: None,
        }
    }
}

/// Job specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// Pod template run by the job.
    #[serde(default)]
    pub template: PodTemplateSpec,
    /// Fields not interpreted by the converter (backoffLimit, ...).
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

// =============================================================================
// CronJob
// =============================================================================

/// A `batch/v1/CronJob`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJob {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: CronJobSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_yaml::Value>,
}

impl CronJob {
    /// Creates a cron job with the given metadata and spec.
    pub fn new(metadata: ObjectMeta, spec: CronJobSpec) -> Self {
        Self {
            api_version: BATCH_V1.to_string(),
            kind: "CronJob".to_string(),
            metadata,
            spec,
            status: None,
        }
    }
}

/// CronJob specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJobSpec {
    /// Cron schedule (e.g. `0 0 * * *`).
    #[serde(default)]
    pub schedule: String,
    /// Template of the jobs created on each tick.
    #[serde(default)]
    pub job_template: JobTemplateSpec,
    /// Fields not interpreted by the converter (concurrencyPolicy, ...).
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

/// Job metadata and spec embedded in a CronJob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTemplateSpec {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: JobSpec,
}
