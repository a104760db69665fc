//! # Sequencing Constants
//!
//! Pinned values of the contract between converted manifests and the
//! Tekton `entrypoint` helper that performs the wait/signal handshake at
//! container runtime. These are the defaults of
//! [`SequencerConfig`](crate::config::SequencerConfig); everything else in
//! the crate reads them through a config record.
//!
//! ## Handshake Layout
//!
//! ```text
//!   /tekton/bin/entrypoint       helper binary, staged by the init container
//!   /tekton/run/<i>/out          step i posts this file when it completes
//!   /tekton/run/<i>/status       step i metadata directory
//!   /tekton/steps                exists only because the helper requires it
//! ```
//!
//! Step `i + 1` waits for `/tekton/run/<i>/out` before starting its
//! original entrypoint. Only step `i` can write to `/tekton/run/<i>`.

// =============================================================================
// Entrypoint Helper
// =============================================================================

/// Pinned digest of the Tekton entrypoint image.
///
/// The digest is pinned so the helper's flag set cannot change underneath
/// converted manifests.
pub const ENTRYPOINT_IMAGE: &str = "gcr.io/tekton-releases/github.com/tektoncd/pipeline/cmd/entrypoint\
     @sha256:40abc3a78b558f251e890085972ed25fe7ad428f47998bc9c9c18f564dc03c32";

/// Path of the helper binary inside the entrypoint image.
pub const ENTRYPOINT_IMAGE_BINARY: &str = "/ko-app/entrypoint";

/// Name of the synchronization init container.
pub const PREPARE_INIT_CONTAINER_NAME: &str = "podseq-prepare";

/// Helper flag: block until this file exists.
pub const FLAG_WAIT_FILE: &str = "-wait_file";

/// Helper flag: write this file once the wrapped command exits.
pub const FLAG_POST_FILE: &str = "-post_file";

/// Helper flag: directory for step metadata.
pub const FLAG_STEP_METADATA_DIR: &str = "-step_metadata_dir";

/// Helper flag: the wrapped command's first token.
pub const FLAG_ENTRYPOINT: &str = "-entrypoint";

/// Separates helper flags from the wrapped command's remaining tokens.
pub const ARGS_SEPARATOR: &str = "--";

// =============================================================================
// Volumes and Mount Paths
// =============================================================================

/// Prefix shared by every volume the converter adds.
pub const VOLUME_PREFIX: &str = "tekton-internal";

/// Mount path of the shared helper binary volume.
pub const BIN_MOUNT_PATH: &str = "/tekton/bin";

/// Mount path of the steps volume (init container only).
pub const STEPS_MOUNT_PATH: &str = "/tekton/steps";

/// Root under which each step's signal directory is mounted.
pub const RUN_MOUNT_ROOT: &str = "/tekton/run";

// =============================================================================
// Conversion Marker
// =============================================================================

/// Annotation key identifying converted objects.
pub const ANNOTATION_KEY: &str = "podseq.io/sequential";

/// Annotation value identifying converted objects.
pub const ANNOTATION_VALUE: &str = "true";

// =============================================================================
// Input Limits
// =============================================================================

/// Maximum size of a manifest stream accepted by the converter (1 MiB).
///
/// Manifests larger than this are almost certainly not hand-written
/// workload definitions.
pub const MAX_MANIFEST_SIZE: usize = 1024 * 1024;
