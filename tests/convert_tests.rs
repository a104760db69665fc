//! Tests for the rewrite engine.
//!
//! Covers the structure of converted pod specs (init container, volumes,
//! mounts, argument chain), validation, and Job/CronJob conversion.

use podseq::pod::{
    ContainerSpec, CronJob, CronJobSpec, Job, JobSpec, JobTemplateSpec, ObjectMeta, Pod, PodSpec,
    PodTemplateSpec, Quantity, ResourceRequirements, Volume, VolumeMount,
};
use podseq::{Error, Sequencer, SequencerConfig, is_converted};
use std::collections::BTreeMap;

// =============================================================================
// Test Helpers
// =============================================================================

fn resources(cpu: &str, memory: &str) -> ResourceRequirements {
    let quantities: BTreeMap<String, Quantity> = [
        ("cpu".to_string(), Quantity::from(cpu)),
        ("memory".to_string(), Quantity::from(memory)),
    ]
    .into_iter()
    .collect();
    ResourceRequirements {
        requests: quantities.clone(),
        limits: quantities,
        ..ResourceRequirements::default()
    }
}

fn container(name: &str, command: &[&str], args: &[&str], mount: (&str, &str)) -> ContainerSpec {
    ContainerSpec {
        args: args.iter().map(|a| a.to_string()).collect(),
        resources: Some(resources("200m", "100M")),
        volume_mounts: vec![VolumeMount::new(mount.0, mount.1)],
        ..ContainerSpec::new(name, "alpine", command.iter().copied())
    }
}

/// Three steps; "aaa" is declared second but sorts first by name.
fn test_pod_spec() -> PodSpec {
    PodSpec {
        volumes: vec![Volume::empty_dir("volume1"), Volume::empty_dir("volume2")],
        init_containers: vec![ContainerSpec {
            working_dir: Some("/tmp".to_string()),
            ..container("dummy-init-container", &["echo"], &["toto"], ("volume1", "/tmp/volume1"))
        }],
        containers: vec![
            container("container1", &["touch"], &["/tmp/volume2/test.txt"], ("volume2", "/tmp/volume2")),
            ContainerSpec {
                working_dir: Some("/".to_string()),
                ..container("aaa", &["ls"], &["-al", "/tmp/volume1"], ("volume1", "/tmp/volume1"))
            },
            container("container3", &["stat"], &["/tmp/volume2/test.txt"], ("volume2", "/tmp/volume2")),
        ],
        restart_policy: Some("Never".to_string()),
        ..PodSpec::default()
    }
}

fn convert(spec: &PodSpec) -> PodSpec {
    Sequencer::default()
        .convert_pod_spec(spec)
        .expect("conversion should succeed")
}

// =============================================================================
// Init Container Tests
// =============================================================================

#[test]
fn test_prepare_init_container_is_first() {
    let converted = convert(&test_pod_spec());

    assert_eq!(converted.init_containers.len(), 2);
    let prepare = &converted.init_containers[0];
    assert_eq!(prepare.name, "podseq-prepare");
    assert_eq!(prepare.image.as_deref(), Some(podseq::ENTRYPOINT_IMAGE));
    assert!(prepare.image.as_deref().is_some_and(|i| i.contains("@sha256:")));
}

#[test]
fn test_user_init_containers_untouched() {
    let spec = test_pod_spec();
    let converted = convert(&spec);

    assert_eq!(converted.init_containers[1], spec.init_containers[0]);
}

// =============================================================================
// Container Order Tests
// =============================================================================

#[test]
fn test_container_order_and_names_preserved() {
    let converted = convert(&test_pod_spec());

    let names: Vec<_> = converted.containers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["container1", "aaa", "container3"]);
}

#[test]
fn test_image_resources_and_working_dir_untouched() {
    let spec = test_pod_spec();
    let converted = convert(&spec);

    for (before, after) in spec.containers.iter().zip(&converted.containers) {
        assert_eq!(before.image, after.image);
        assert_eq!(before.resources, after.resources);
        assert_eq!(before.working_dir, after.working_dir);
    }
}

#[test]
fn test_input_is_not_modified() {
    let spec = test_pod_spec();
    let snapshot = spec.clone();

    let _ = convert(&spec);

    assert_eq!(spec, snapshot);
}

#[test]
fn test_pass_through_fields_preserved() {
    let mut spec = test_pod_spec();
    spec.extra.insert(
        "automountServiceAccountToken".into(),
        serde_yaml::Value::Bool(false),
    );

    let converted = convert(&spec);

    assert_eq!(converted.restart_policy.as_deref(), Some("Never"));
    assert_eq!(converted.extra, spec.extra);
}

// =============================================================================
// Volume Tests
// =============================================================================

#[test]
fn test_volume_count() {
    let spec = test_pod_spec();
    let converted = convert(&spec);

    assert_eq!(
        converted.volumes.len(),
        spec.volumes.len() + 2 + spec.containers.len()
    );
}

#[test]
fn test_added_volumes_are_empty_dirs() {
    let converted = convert(&test_pod_spec());

    let added: Vec<_> = converted.volumes[2..].iter().map(|v| v.name.as_str()).collect();
    assert_eq!(
        added,
        [
            "tekton-internal-steps",
            "tekton-internal-bin",
            "tekton-internal-run-0",
            "tekton-internal-run-1",
            "tekton-internal-run-2",
        ]
    );
    assert!(converted.volumes.iter().all(Volume::is_empty_dir));
}

#[test]
fn test_volume_names_unique() {
    let converted = convert(&test_pod_spec());

    let mut names: Vec<_> = converted.volumes.iter().map(|v| v.name.clone()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), converted.volumes.len());
}

// =============================================================================
// Volume Mount Tests
// =============================================================================

#[test]
fn test_mount_count() {
    let spec = test_pod_spec();
    let converted = convert(&spec);
    let steps = spec.containers.len();

    for (before, after) in spec.containers.iter().zip(&converted.containers) {
        assert_eq!(after.volume_mounts.len(), before.volume_mounts.len() + 1 + steps);
    }
}

#[test]
fn test_only_own_run_mount_is_writable() {
    let converted = convert(&test_pod_spec());

    for (index, container) in converted.containers.iter().enumerate() {
        let run_mounts: Vec<_> = container
            .volume_mounts
            .iter()
            .filter(|m| m.name.starts_with("tekton-internal-run-"))
            .collect();
        assert_eq!(run_mounts.len(), 3);

        let writable: Vec<_> = run_mounts.iter().filter(|m| !m.read_only).collect();
        assert_eq!(writable.len(), 1, "container {} writable mounts", container.name);
        assert_eq!(writable[0].name, format!("tekton-internal-run-{index}"));
        assert_eq!(writable[0].mount_path, format!("/tekton/run/{index}"));
    }
}

#[test]
fn test_bin_mount_is_read_only() {
    let converted = convert(&test_pod_spec());

    for container in &converted.containers {
        let bin = container
            .volume_mounts
            .iter()
            .find(|m| m.name == "tekton-internal-bin")
            .expect("bin mount present");
        assert_eq!(bin.mount_path, "/tekton/bin");
        assert!(bin.read_only);
    }
}

#[test]
fn test_original_mounts_kept_first() {
    let spec = test_pod_spec();
    let converted = convert(&spec);

    assert_eq!(converted.containers[0].volume_mounts[0], spec.containers[0].volume_mounts[0]);
}

// =============================================================================
// Command and Argument Tests
// =============================================================================

#[test]
fn test_command_replaced_by_entrypoint() {
    let converted = convert(&test_pod_spec());

    for container in &converted.containers {
        assert_eq!(container.command, ["/tekton/bin/entrypoint"]);
    }
}

#[test]
fn test_first_step_args() {
    let converted = convert(&test_pod_spec());

    assert_eq!(
        converted.containers[0].args,
        [
            "-post_file",
            "/tekton/run/0/out",
            "-step_metadata_dir",
            "/tekton/run/0/status",
            "-entrypoint",
            "touch",
            "--",
            "/tmp/volume2/test.txt",
        ]
    );
}

#[test]
fn test_later_step_args_wait_for_predecessor() {
    let converted = convert(&test_pod_spec());

    assert_eq!(
        converted.containers[1].args,
        [
            "-wait_file",
            "/tekton/run/0/out",
            "-post_file",
            "/tekton/run/1/out",
            "-step_metadata_dir",
            "/tekton/run/1/status",
            "-entrypoint",
            "ls",
            "--",
            "-al",
            "/tmp/volume1",
        ]
    );
    assert_eq!(converted.containers[2].args[1], "/tekton/run/1/out");
}

#[test]
fn test_multi_token_command_split_around_separator() {
    let spec = PodSpec {
        containers: vec![ContainerSpec {
            args: vec!["echo hi".to_string()],
            ..ContainerSpec::new("shell", "alpine", ["sh", "-c"])
        }],
        ..PodSpec::default()
    };

    let converted = convert(&spec);

    let args = &converted.containers[0].args;
    let separator = args.iter().position(|a| a == "--").expect("separator");
    assert_eq!(args[separator - 1], "sh");
    assert_eq!(args[separator + 1..], ["-c", "echo hi"]);
}

#[test]
fn test_step_without_args() {
    let spec = PodSpec {
        containers: vec![ContainerSpec::new("say-nothing", "docker/whalesay", ["cowsay"])],
        ..PodSpec::default()
    };

    let converted = convert(&spec);

    assert_eq!(converted.containers[0].args.last().map(String::as_str), Some("--"));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_missing_commands_reported_together() {
    let spec = PodSpec {
        containers: vec![
            ContainerSpec {
                name: "a".to_string(),
                ..ContainerSpec::default()
            },
            ContainerSpec {
                name: "b".to_string(),
                args: vec!["goodbye".to_string()],
                ..ContainerSpec::default()
            },
        ],
        ..PodSpec::default()
    };

    let err = Sequencer::default()
        .convert_pod_spec(&spec)
        .expect_err("should fail validation");
    let msg = err.to_string();

    assert!(matches!(err, Error::ContainerMissingCommand { ref containers } if containers == &["a", "b"]));
    assert!(msg.ends_with(": a, b"), "should name a and b: {msg}");
}

#[test]
fn test_valid_containers_not_reported() {
    let mut spec = test_pod_spec();
    spec.containers[1].command.clear();

    let err = podseq::validate_pod_spec(&spec).expect_err("should fail");

    match err {
        Error::ContainerMissingCommand { containers } => assert_eq!(containers, ["aaa"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_init_container_without_command_is_allowed() {
    let mut spec = test_pod_spec();
    spec.init_containers[0].command.clear();

    assert!(Sequencer::default().convert_pod_spec(&spec).is_ok());
}

#[test]
fn test_empty_pod_spec_converts() {
    let converted = convert(&PodSpec::default());

    assert_eq!(converted.init_containers.len(), 1);
    assert_eq!(converted.volumes.len(), 2);
    assert!(converted.containers.is_empty());
}

// =============================================================================
// Custom Config Tests
// =============================================================================

#[test]
fn test_custom_config_names() {
    let config = SequencerConfig {
        init_container_name: "sync-prepare".to_string(),
        volume_prefix: "sync".to_string(),
        run_mount_root: "/sync/run".to_string(),
        ..SequencerConfig::default()
    };
    let converted = Sequencer::new(config)
        .convert_pod_spec(&test_pod_spec())
        .expect("should convert");

    assert_eq!(converted.init_containers[0].name, "sync-prepare");
    assert!(converted.volumes.iter().any(|v| v.name == "sync-run-2"));
    assert_eq!(converted.containers[1].args[1], "/sync/run/0/out");
}

// =============================================================================
// Workload Tests
// =============================================================================

#[test]
fn test_convert_pod_marks_metadata() {
    let sequencer = Sequencer::default();
    let pod = Pod::new(ObjectMeta::named("dummy"), test_pod_spec());
    assert!(!sequencer.is_converted(&pod.metadata));

    let converted = sequencer.convert_pod(&pod).expect("should convert");

    assert!(sequencer.is_converted(&converted.metadata));
    assert_eq!(converted.metadata.name.as_deref(), Some("dummy"));
    assert_eq!(converted.kind, "Pod");
    assert_eq!(converted.spec, convert(&pod.spec));
}

#[test]
fn test_convert_job_marks_job_and_template() {
    let sequencer = Sequencer::default();
    let mut spec = JobSpec {
        template: PodTemplateSpec {
            metadata: ObjectMeta::default(),
            spec: test_pod_spec(),
        },
        ..JobSpec::default()
    };
    spec.extra.insert("backoffLimit".into(), 1.into());
    let job = Job::new(ObjectMeta::named("dummy"), spec);

    let converted = sequencer.convert_job(&job).expect("should convert");

    assert!(sequencer.is_converted(&converted.metadata));
    assert!(sequencer.is_converted(&converted.spec.template.metadata));
    assert_eq!(converted.spec.template.spec.init_containers.len(), 2);
    assert_eq!(converted.spec.extra, job.spec.extra);
}

#[test]
fn test_convert_cron_job_marks_every_level() {
    let config = SequencerConfig::default();
    let cron_job = CronJob::new(
        ObjectMeta::named("dummy"),
        CronJobSpec {
            schedule: "0 0 * * *".to_string(),
            job_template: JobTemplateSpec {
                metadata: ObjectMeta::default(),
                spec: JobSpec {
                    template: PodTemplateSpec {
                        metadata: ObjectMeta::default(),
                        spec: test_pod_spec(),
                    },
                    ..JobSpec::default()
                },
            },
            ..CronJobSpec::default()
        },
    );

    let converted = Sequencer::new(config.clone())
        .convert_cron_job(&cron_job)
        .expect("should convert");

    let template = &converted.spec.job_template;
    assert!(is_converted(&converted.metadata, &config));
    assert!(is_converted(&template.metadata, &config));
    assert!(is_converted(&template.spec.template.metadata, &config));
    assert_eq!(converted.spec.schedule, "0 0 * * *");
    assert_eq!(template.spec.template.spec.containers[0].command, ["/tekton/bin/entrypoint"]);
}

#[test]
fn test_failed_job_conversion_returns_nothing() {
    let mut pod_spec = test_pod_spec();
    pod_spec.containers[0].command.clear();
    let job = Job::new(
        ObjectMeta::named("broken"),
        JobSpec {
            template: PodTemplateSpec {
                metadata: ObjectMeta::default(),
                spec: pod_spec,
            },
            ..JobSpec::default()
        },
    );

    let result = Sequencer::default().convert_job(&job);

    assert!(matches!(result, Err(Error::ContainerMissingCommand { .. })));
    assert!(job.metadata.annotations.is_none(), "input must stay unmarked");
}
