//! # Kubernetes Workload Types
//!
//! Typed mirrors of the parts of the Kubernetes API that sequencing
//! touches. Each type maps the API's camelCase field names through serde,
//! and every struct that the converter rewrites keeps unknown fields in a
//! flattened `extra` mapping:
//!
//! ```text
//!   YAML ──decode──▶ Pod { metadata, spec: PodSpec { .., extra }, .. }
//!                        │
//!                        ▼ convert
//!   YAML ◀──encode── Pod { metadata', spec': PodSpec { .., extra }, .. }
//! ```
//!
//! Fields the converter does not know about (`env`, probes, tolerations,
//! `backoffLimit`, ...) therefore come out exactly as they went in.

mod meta;
mod spec;
mod state;
mod workload;

pub use meta::ObjectMeta;
pub use spec::{
    ContainerSpec, EmptyDirVolumeSource, PodSpec, Quantity, ResourceRequirements, Volume,
    VolumeMount,
};
pub use state::{
    ContainerState, ContainerStateRunning, ContainerStateTerminated, ContainerStateWaiting,
    ContainerStatus, PodPhase, PodStatus,
};
pub use workload::{
    BATCH_V1, CORE_V1, CronJob, CronJobSpec, Job, JobSpec, JobTemplateSpec, Pod, PodTemplateSpec,
};
