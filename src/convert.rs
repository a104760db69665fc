//! # Rewrite Engine
//!
//! Turns a pod spec whose regular containers would start together into one
//! where they run strictly in declared order.
//!
//! Kubernetes starts every regular container of a pod at once, so ordering
//! has to be enforced inside each container. Every step is wrapped by the
//! Tekton entrypoint helper, which waits for its predecessor's signal file
//! before exec'ing the original command and writes its own signal file when
//! that command exits:
//!
//! ```text
//!  init: podseq-prepare   copies helper into /tekton/bin
//!        (user init containers, unchanged)
//!
//!  step 0  entrypoint                      -post_file /tekton/run/0/out ...
//!  step 1  entrypoint -wait_file /tekton/run/0/out -post_file /tekton/run/1/out ...
//!  step 2  entrypoint -wait_file /tekton/run/1/out -post_file /tekton/run/2/out ...
//! ```
//!
//! Every step mounts every `/tekton/run/<j>` directory, read-write only for
//! its own index, so a step can only ever signal its own completion.
//!
//! Conversion is a pure function: the input is never mutated and a failed
//! validation produces no output at all.

use crate::config::SequencerConfig;
use crate::constants::{
    ARGS_SEPARATOR, FLAG_ENTRYPOINT, FLAG_POST_FILE, FLAG_STEP_METADATA_DIR, FLAG_WAIT_FILE,
};
use crate::error::{Error, Result};
use crate::pod::{ContainerSpec, CronJob, Job, Pod, PodSpec, Volume, VolumeMount};
use crate::sequencer::Sequencer;

// =============================================================================
// Validation
// =============================================================================

/// Checks that every regular container declares a command.
///
/// The helper needs the original entrypoint as `-entrypoint`, and an image's
/// own entrypoint is not visible in the manifest. All offending containers
/// are reported in a single error.
pub fn validate_pod_spec(spec: &PodSpec) -> Result<()> {
    let missing: Vec<String> = spec
        .containers
        .iter()
        .filter(|c| !c.has_command())
        .map(|c| c.name.clone())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::ContainerMissingCommand {
            containers: missing,
        })
    }
}

// =============================================================================
// Conversion
// =============================================================================

impl Sequencer {
    /// Rewrites a pod spec so its regular containers run sequentially.
    ///
    /// # Errors
    ///
    /// - `ContainerMissingCommand` if any regular container has no command
    pub fn convert_pod_spec(&self, spec: &PodSpec) -> Result<PodSpec> {
        validate_pod_spec(spec)?;

        let config = self.config();
        if spec.container_names().any(|n| n == config.init_container_name) {
            tracing::warn!(
                name = %config.init_container_name,
                "container name collides with the synchronization init container"
            );
        }

        let step_count = spec.containers.len();
        let mut converted = spec.clone();

        converted
            .init_containers
            .insert(0, prepare_init_container(config));

        converted.volumes.push(Volume::empty_dir(config.steps_volume()));
        converted.volumes.push(Volume::empty_dir(config.bin_volume()));
        converted
            .volumes
            .extend((0..step_count).map(|i| Volume::empty_dir(config.run_volume(i))));

        for (index, container) in converted.containers.iter_mut().enumerate() {
            wrap_step(container, index, step_count, config);
        }

        tracing::debug!(steps = step_count, "converted pod spec");
        Ok(converted)
    }

    /// Converts a pod: marks its metadata and rewrites its spec.
    pub fn convert_pod(&self, pod: &Pod) -> Result<Pod> {
        let spec = self.convert_pod_spec(&pod.spec)?;
        tracing::debug!(name = ?pod.metadata.name, "converted pod");

        Ok(Pod {
            metadata: self.mark(&pod.metadata),
            spec,
            ..pod.clone()
        })
    }

    /// Converts a job: marks the job and its pod template, rewrites the
    /// template spec.
    pub fn convert_job(&self, job: &Job) -> Result<Job> {
        let pod_spec = self.convert_pod_spec(&job.spec.template.spec)?;
        tracing::debug!(name = ?job.metadata.name, "converted job");

        let mut converted = job.clone();
        converted.metadata = self.mark(&job.metadata);
        converted.spec.template.metadata = self.mark(&job.spec.template.metadata);
        converted.spec.template.spec = pod_spec;
        Ok(converted)
    }

    /// Converts a cron job: marks the cron job, its job template and its
    /// pod template, rewrites the nested pod spec.
    pub fn convert_cron_job(&self, cron_job: &CronJob) -> Result<CronJob> {
        let job_template = &cron_job.spec.job_template;
        let pod_spec = self.convert_pod_spec(&job_template.spec.template.spec)?;
        tracing::debug!(name = ?cron_job.metadata.name, "converted cron job");

        let mut converted = cron_job.clone();
        converted.metadata = self.mark(&cron_job.metadata);
        let template = &mut converted.spec.job_template;
        template.metadata = self.mark(&job_template.metadata);
        template.spec.template.metadata = self.mark(&job_template.spec.template.metadata);
        template.spec.template.spec = pod_spec;
        Ok(converted)
    }
}

/// Builds the init container that stages the helper into the bin volume.
fn prepare_init_container(config: &SequencerConfig) -> ContainerSpec {
    let staged = config.staged_entrypoint();
    ContainerSpec {
        volume_mounts: vec![
            VolumeMount::new(config.bin_volume(), &config.bin_mount_path),
            // Unused afterwards; the helper only requires the directory to exist.
            VolumeMount::new(config.steps_volume(), &config.steps_mount_path),
        ],
        ..ContainerSpec::new(
            &config.init_container_name,
            &config.entrypoint_image,
            [
                config.entrypoint_image_binary.as_str(),
                "init",
                config.entrypoint_image_binary.as_str(),
                staged.as_str(),
            ],
        )
    }
}

/// Rewrites one regular container into step `index` of `step_count`.
///
/// Callers must have validated that the container has a command.
fn wrap_step(
    container: &mut ContainerSpec,
    index: usize,
    step_count: usize,
    config: &SequencerConfig,
) {
    container
        .volume_mounts
        .push(VolumeMount::read_only(config.bin_volume(), &config.bin_mount_path));
    container.volume_mounts.extend((0..step_count).map(|other| {
        let mount = VolumeMount::new(config.run_volume(other), config.run_mount_path(other));
        VolumeMount {
            read_only: other != index,
            ..mount
        }
    }));

    let command = std::mem::take(&mut container.command);
    let original_args = std::mem::take(&mut container.args);
    let (entrypoint, rest) = command
        .split_first()
        .map(|(first, rest)| (first.clone(), rest.to_vec()))
        .unwrap_or_default();

    let mut args = Vec::with_capacity(10 + rest.len() + original_args.len());
    if index > 0 {
        args.push(FLAG_WAIT_FILE.to_string());
        args.push(config.post_file(index - 1));
    }
    args.extend([
        FLAG_POST_FILE.to_string(),
        config.post_file(index),
        FLAG_STEP_METADATA_DIR.to_string(),
        config.step_metadata_dir(index),
        FLAG_ENTRYPOINT.to_string(),
        entrypoint,
        ARGS_SEPARATOR.to_string(),
    ]);
    args.extend(rest);
    args.extend(original_args);

    container.args = args;
    container.command = vec![config.staged_entrypoint()];
}
