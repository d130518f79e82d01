//! Error types for metadata decoding.

use lm_objects::ObjectError;
use lm_types::{EntryTypeTag, Hash256};

/// Errors that can occur while decoding transaction metadata.
///
/// Errors belong to one affected node. A kind without a registered schema
/// is not an error at all; it yields an identity-only node.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// A required envelope field or field block is missing or mis-shaped.
    #[error("malformed metadata: {0}")]
    MalformedMetadata(String),

    /// The schema for a decodable kind rejected the normalized record.
    #[error("failed to decode {entry_type} object {ledger_index}: {source}")]
    TypedDecode {
        entry_type: EntryTypeTag,
        ledger_index: Hash256,
        source: ObjectError,
    },

    /// A batch element failed; `position` is its index in the input array.
    #[error("affected node {position}: {source}")]
    AtPosition {
        position: usize,
        #[source]
        source: Box<MetaError>,
    },

    /// Decoder configuration could not be read.
    #[error("configuration error: {0}")]
    Config(String),

    /// A decoded snapshot could not be turned back into a field map.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl MetaError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMetadata(reason.into())
    }

    /// The error with any batch position stripped off.
    pub fn root(&self) -> &MetaError {
        match self {
            Self::AtPosition { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.root(), Self::MalformedMetadata(_))
    }

    pub fn is_typed_decode(&self) -> bool {
        matches!(self.root(), Self::TypedDecode { .. })
    }
}

/// Convenience alias for metadata results.
pub type MetaResult<T> = Result<T, MetaError>;
