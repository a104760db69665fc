//! The [`Sequencer`] handle.
//!
//! Owns an immutable [`SequencerConfig`]. Conversion lives in
//! [`crate::convert`], step tracking in [`crate::status`].

use crate::config::SequencerConfig;
use crate::marker;
use crate::pod::ObjectMeta;

/// Converts workloads to run sequentially and reads back their progress.
///
/// Stateless apart from its configuration; a single instance can serve any
/// number of calls.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    config: SequencerConfig,
}

impl Sequencer {
    /// Creates a sequencer with the given configuration.
    pub fn new(config: SequencerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Returns a copy of `meta` carrying the conversion annotation.
    pub fn mark(&self, meta: &ObjectMeta) -> ObjectMeta {
        marker::mark_converted(meta, &self.config)
    }

    /// Returns true if `meta` carries the conversion annotation.
    pub fn is_converted(&self, meta: &ObjectMeta) -> bool {
        marker::is_converted(meta, &self.config)
    }
}
