//! Error types for manifest conversion and step tracking.

/// Result type alias for podseq operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting manifests or reading pod status.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// One or more regular containers have no command.
    ///
    /// Every offending container is listed so all of them can be fixed at once.
    #[error("pod spec is invalid: containers without a command: {}", .containers.join(", "))]
    ContainerMissingCommand { containers: Vec<String> },

    // =========================================================================
    // Precondition Errors
    // =========================================================================
    /// The object does not carry the conversion annotation.
    #[error("pod was not converted to run its containers sequentially")]
    NotConverted,

    /// The pod is in a phase where no step can be active.
    #[error("pod is not running: got phase '{phase}'")]
    NotYetRunning { phase: String },

    // =========================================================================
    // Terminal State Errors
    // =========================================================================
    /// The pod already completed successfully.
    #[error("pod is succeeded")]
    AlreadySucceeded,

    /// The pod already failed.
    #[error("pod is failed")]
    AlreadyFailed,

    // =========================================================================
    // Manifest Errors
    // =========================================================================
    /// The `apiVersion`/`kind` pair is not a supported workload.
    #[error("unsupported object ({api_version}, {kind})")]
    UnsupportedKind { api_version: String, kind: String },

    /// The document is not a well-formed Kubernetes object.
    #[error("malformed kubernetes object: {0}")]
    MalformedObject(String),

    /// Invalid input (oversized manifest, unreadable config, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns true if the pod reached a terminal phase.
    ///
    /// Polling callers should stop asking once this is true.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Error::AlreadySucceeded | Error::AlreadyFailed)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
