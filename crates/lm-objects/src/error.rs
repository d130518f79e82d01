//! Error types for the schema crate.

use lm_types::EntryTypeTag;

/// Errors produced while decoding a ledger-object record.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    /// No schema is registered for the requested kind.
    #[error("no schema registered for entry type {0}")]
    UnknownKind(EntryTypeTag),

    /// The record decoded as a different kind than the one requested.
    #[error("record requested as {requested} decoded as {decoded}")]
    KindMismatch {
        requested: EntryTypeTag,
        decoded: EntryTypeTag,
    },

    /// A field was missing or had the wrong shape.
    #[error("invalid {kind} record: {source}")]
    InvalidRecord {
        kind: EntryTypeTag,
        #[source]
        source: serde_json::Error,
    },
}
