//! Manifest documents.
//!
//! Decodes YAML (or JSON) manifest streams into typed workloads, dispatches
//! on `apiVersion`/`kind`, and encodes converted objects back to YAML.
//!
//! # Supported Objects
//!
//! | apiVersion | kind    |
//! |------------|---------|
//! | `v1`       | Pod     |
//! | `batch/v1` | Job     |
//! | `batch/v1` | CronJob |

use crate::constants::MAX_MANIFEST_SIZE;
use crate::error::{Error, Result};
use crate::pod::{BATCH_V1, CORE_V1, CronJob, Job, Pod};
use crate::sequencer::Sequencer;
use serde::Deserialize;

/// A workload object whose pod spec can be converted.
#[derive(Debug, Clone, PartialEq)]
pub enum Workload {
    Pod(Pod),
    Job(Job),
    CronJob(CronJob),
}

impl Workload {
    /// Decodes a workload from a generic YAML value.
    ///
    /// # Errors
    ///
    /// - `MalformedObject` if `apiVersion` or `kind` is missing or not a
    ///   string, or the object does not match its kind's schema
    /// - `UnsupportedKind` for any other `apiVersion`/`kind` pair
    pub fn from_value(value: serde_yaml::Value) -> Result<Self> {
        let api_version = value
            .get("apiVersion")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::MalformedObject("apiVersion is not a string".to_string()))?
            .to_string();
        let kind = value
            .get("kind")
            .and_then(|k| k.as_str())
            .ok_or_else(|| Error::MalformedObject("kind is not a string".to_string()))?
            .to_string();

        let decoded = match (api_version.as_str(), kind.as_str()) {
            (CORE_V1, "Pod") => serde_yaml::from_value(value).map(Workload::Pod),
            (BATCH_V1, "Job") => serde_yaml::from_value(value).map(Workload::Job),
            (BATCH_V1, "CronJob") => serde_yaml::from_value(value).map(Workload::CronJob),
            _ => return Err(Error::UnsupportedKind { api_version, kind }),
        };
        decoded.map_err(|e| Error::MalformedObject(format!("{kind}: {e}")))
    }

    /// Returns the object's `apiVersion`.
    pub fn api_version(&self) -> &str {
        match self {
            Workload::Pod(pod) => &pod.api_version,
            Workload::Job(job) => &job.api_version,
            Workload::CronJob(cron_job) => &cron_job.api_version,
        }
    }

    /// Returns the object's `kind`.
    pub fn kind(&self) -> &str {
        match self {
            Workload::Pod(pod) => &pod.kind,
            Workload::Job(job) => &job.kind,
            Workload::CronJob(cron_job) => &cron_job.kind,
        }
    }

    /// Encodes the object as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        let yaml = match self {
            Workload::Pod(pod) => serde_yaml::to_string(pod)?,
            Workload::Job(job) => serde_yaml::to_string(job)?,
            Workload::CronJob(cron_job) => serde_yaml::to_string(cron_job)?,
        };
        Ok(yaml)
    }
}

impl Sequencer {
    /// Converts any supported workload.
    pub fn convert_workload(&self, workload: &Workload) -> Result<Workload> {
        Ok(match workload {
            Workload::Pod(pod) => Workload::Pod(self.convert_pod(pod)?),
            Workload::Job(job) => Workload::Job(self.convert_job(job)?),
            Workload::CronJob(cron_job) => Workload::CronJob(self.convert_cron_job(cron_job)?),
        })
    }
}

fn check_size(input: &str) -> Result<()> {
    if input.len() > MAX_MANIFEST_SIZE {
        return Err(Error::InvalidInput(format!(
            "manifest size {} exceeds limit of {}",
            input.len(),
            MAX_MANIFEST_SIZE
        )));
    }
    Ok(())
}

/// Decodes every non-empty document of a YAML stream.
pub fn parse_documents(input: &str) -> Result<Vec<Workload>> {
    check_size(input)?;

    let mut workloads = Vec::new();
    for document in serde_yaml::Deserializer::from_str(input) {
        let value = serde_yaml::Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }
        workloads.push(Workload::from_value(value)?);
    }
    Ok(workloads)
}

/// Converts every document of a YAML stream.
///
/// Each converted object is emitted as `---\n<yaml>`, in input order. The
/// first document that fails aborts the whole stream.
pub fn convert_documents(input: &str, sequencer: &Sequencer) -> Result<String> {
    let mut output = String::new();
    for (index, workload) in parse_documents(input)?.iter().enumerate() {
        let converted = sequencer.convert_workload(workload).inspect_err(|e| {
            tracing::debug!(document = index, kind = workload.kind(), error = %e, "conversion failed");
        })?;
        output.push_str("---\n");
        output.push_str(&converted.to_yaml()?);
    }
    Ok(output)
}

/// Decodes a single pod, typically one read back from the cluster with
/// its status.
pub fn read_pod(input: &str) -> Result<Pod> {
    check_size(input)?;

    match Workload::from_value(serde_yaml::from_str(input)?)? {
        Workload::Pod(pod) => Ok(pod),
        other => Err(Error::UnsupportedKind {
            api_version: other.api_version().to_string(),
            kind: other.kind().to_string(),
        }),
    }
}
