//! # podseq
//!
//! **Sequential Containers for Kubernetes Workloads**
//!
//! Kubernetes starts every regular container of a pod at the same time.
//! This crate rewrites Pod, Job and CronJob manifests so their containers
//! run one after another, in declared order, without a controller or an
//! admission webhook. Ordering is enforced inside each container by the
//! Tekton `entrypoint` helper, using signal files on shared volumes.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                             podseq                                  │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  document   YAML stream ─▶ Workload { Pod | Job | CronJob }         │
//! │                              │                                      │
//! │  convert    PodSpec ─▶ PodSpec'   (+ init container, volumes,       │
//! │                                      wrapped command/args)          │
//! │  marker     metadata.annotations["podseq.io/sequential"] = "true"   │
//! │                                                                     │
//! │  status     converted Pod + live status ─▶ active step name         │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  config     SequencerConfig: image digest, names, mount paths       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both directions are pure functions over in-memory values. Nothing is
//! scheduled, executed or watched here; polling a live cluster and its
//! retry policy belong to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use podseq::{Sequencer, StepState, document};
//!
//! let sequencer = Sequencer::default();
//! let output = document::convert_documents(&manifest, &sequencer)?;
//!
//! // Later, with the pod read back from the cluster:
//! match sequencer.active_step(&pod)? {
//!     StepState::Running(name) => println!("running {name}"),
//!     StepState::AllStepsFinished => println!("done"),
//! }
//! ```

pub mod config;
pub mod constants;
pub mod convert;
pub mod document;
pub mod error;
pub mod marker;
pub mod pod;
pub mod sequencer;
pub mod status;

// Re-exports
pub use config::SequencerConfig;
pub use constants::*;
pub use convert::validate_pod_spec;
pub use document::{Workload, convert_documents, parse_documents, read_pod};
pub use error::{Error, Result};
pub use marker::{is_converted, mark_converted};
pub use sequencer::Sequencer;
pub use status::StepState;
