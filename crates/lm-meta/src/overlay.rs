//! Reconstructing the previous state of a modified object.
//!
//! `PreviousFields` lists only the fields whose value changed, with their
//! old values. Laying that delta over the final record reverses the change.

use serde_json::{Map, Value};

use crate::normalize::CompleteRecord;

/// `final_record` with every field in `delta` replaced by the delta's value.
pub fn overlay(final_record: &CompleteRecord, delta: &Map<String, Value>) -> CompleteRecord {
    let mut merged = final_record.clone();
    for (field, value) in delta {
        merged.set(field, value.clone());
    }
    merged
}

/// The record before the transaction, if the node carried a delta.
///
/// An absent or empty delta yields `None`: nothing changed, and the
/// previous state is left unreconstructed rather than assumed equal.
pub fn reconstruct_previous(
    final_record: &CompleteRecord,
    delta: Option<&Map<String, Value>>,
) -> Option<CompleteRecord> {
    match delta {
        Some(delta) if !delta.is_empty() => Some(overlay(final_record, delta)),
        _ => None,
    }
}
