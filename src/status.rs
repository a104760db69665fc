//! # Status Interpreter
//!
//! Reports which step of a converted pod is currently executing.
//!
//! The API server returns container statuses sorted by name, which has
//! nothing to do with execution order. A pod declaring steps `c-step` then
//! `aaa-step` reports them as `[aaa-step, c-step]`; walking that list
//! naively would name `aaa-step` as active while it is still waiting on
//! `c-step`. Declared order is therefore rebuilt from the pod spec:
//!
//! ```text
//!   spec:    init: [podseq-prepare, setup]   containers: [c-step, aaa-step]
//!   index:          0               1                     2       3
//!
//!   status (by name)          status (by declared index)
//!   init: [podseq-prepare,    init: [podseq-prepare, setup]
//!          setup]        ──▶  regular: [c-step, aaa-step]
//!   regular: [aaa-step,
//!             c-step]
//! ```
//!
//! The first container in that order without a finished terminated record
//! is the active step. The synchronization init container is skipped.

use crate::error::{Error, Result};
use crate::pod::{ContainerStatus, Pod, PodPhase, PodSpec, PodStatus};
use crate::sequencer::Sequencer;
use std::collections::HashMap;

/// Progress of a converted pod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepState {
    /// The named container is the active step.
    Running(String),
    /// Every step finished. The pod phase may not have caught up yet.
    AllStepsFinished,
}

impl StepState {
    /// Returns the active container name, if any.
    pub fn running(&self) -> Option<&str> {
        match self {
            StepState::Running(name) => Some(name),
            StepState::AllStepsFinished => None,
        }
    }
}

impl std::fmt::Display for StepState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepState::Running(name) => write!(f, "{name}"),
            StepState::AllStepsFinished => write!(f, "all steps finished"),
        }
    }
}

impl Sequencer {
    /// Returns the step currently executing in a converted pod.
    ///
    /// # Errors
    ///
    /// - `NotConverted` if the pod lacks the conversion annotation
    /// - `AlreadySucceeded` / `AlreadyFailed` for terminal phases
    /// - `NotYetRunning` for any phase other than Running or Pending
    pub fn active_step(&self, pod: &Pod) -> Result<StepState> {
        if !self.is_converted(&pod.metadata) {
            return Err(Error::NotConverted);
        }

        let default_status = PodStatus::default();
        let status = pod.status.as_ref().unwrap_or(&default_status);
        check_phase(status.phase.as_ref())?;

        let skip = self.config().init_container_name.as_str();
        let active = statuses_in_step_order(&pod.spec, status)
            .into_iter()
            .filter(|s| s.name != skip)
            .find(|s| !s.is_finished());

        Ok(match active {
            Some(container) => StepState::Running(container.name.clone()),
            None => StepState::AllStepsFinished,
        })
    }
}

fn check_phase(phase: Option<&PodPhase>) -> Result<()> {
    match phase {
        Some(PodPhase::Running | PodPhase::Pending) => Ok(()),
        Some(PodPhase::Succeeded) => Err(Error::AlreadySucceeded),
        Some(PodPhase::Failed) => Err(Error::AlreadyFailed),
        Some(phase @ (PodPhase::Unknown | PodPhase::Other(_))) => Err(Error::NotYetRunning {
            phase: phase.to_string(),
        }),
        None => Err(Error::NotYetRunning {
            phase: String::new(),
        }),
    }
}

/// Orders init and regular statuses by declared position, init first.
///
/// Statuses for containers missing from the spec sort last.
fn statuses_in_step_order<'a>(spec: &PodSpec, status: &'a PodStatus) -> Vec<&'a ContainerStatus> {
    let order: HashMap<&str, usize> = spec
        .container_names()
        .enumerate()
        .map(|(index, name)| (name, index))
        .collect();
    let position = |s: &&ContainerStatus| order.get(s.name.as_str()).copied().unwrap_or(usize::MAX);

    let mut init: Vec<_> = status.init_container_statuses.iter().collect();
    let mut regular: Vec<_> = status.container_statuses.iter().collect();
    init.sort_by_key(position);
    regular.sort_by_key(position);

    init.extend(regular);
    init
}
