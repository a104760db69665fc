//! Conversion marker.
//!
//! A converted object carries one fixed annotation. Any consumer can test
//! for it without re-running the converter, and the status interpreter
//! refuses to read pods that lack it.

use crate::config::SequencerConfig;
use crate::pod::ObjectMeta;

/// Returns a copy of `meta` carrying the conversion annotation.
///
/// Creates the annotation map if absent. Marking an already marked object
/// yields an identical map.
pub fn mark_converted(meta: &ObjectMeta, config: &SequencerConfig) -> ObjectMeta {
    let mut marked = meta.clone();
    marked
        .annotations
        .get_or_insert_with(Default::default)
        .insert(config.annotation_key.clone(), config.annotation_value.clone());
    marked
}

/// Returns true if `meta` carries the conversion annotation.
pub fn is_converted(meta: &ObjectMeta, config: &SequencerConfig) -> bool {
    meta.annotation(&config.annotation_key) == Some(config.annotation_value.as_str())
}
