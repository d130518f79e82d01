use serde_json::{Map, Value};

use lm_types::EntryTypeTag;

use crate::error::ObjectError;
use crate::object::{LedgerObject, DECODABLE_KINDS};

/// Decode boundary between metadata reconciliation and per-kind schemas.
///
/// `record` is a complete field map: identity and bookkeeping fields have
/// already been filled in by the caller.
pub trait SchemaDecoder: Send + Sync {
    /// Kinds this decoder can turn into a [`LedgerObject`].
    fn catalog(&self) -> Vec<EntryTypeTag>;

    fn decode_typed(
        &self,
        tag: &EntryTypeTag,
        record: &Map<String, Value>,
    ) -> Result<LedgerObject, ObjectError>;
}

/// The serde-backed decoder for the kinds in [`DECODABLE_KINDS`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SerdeSchema;

impl SchemaDecoder for SerdeSchema {
    fn catalog(&self) -> Vec<EntryTypeTag> {
        DECODABLE_KINDS.iter().map(|kind| kind.tag()).collect()
    }

    fn decode_typed(
        &self,
        tag: &EntryTypeTag,
        record: &Map<String, Value>,
    ) -> Result<LedgerObject, ObjectError> {
        let known = tag
            .entry_type()
            .is_some_and(|kind| DECODABLE_KINDS.contains(&kind));
        if !known {
            return Err(ObjectError::UnknownKind(tag.clone()));
        }

        let object: LedgerObject = serde_json::from_value(Value::Object(record.clone()))
            .map_err(|source| ObjectError::InvalidRecord {
                kind: tag.clone(),
                source,
            })?;

        let decoded = object.entry_type().tag();
        if decoded != *tag {
            return Err(ObjectError::KindMismatch {
                requested: tag.clone(),
                decoded,
            });
        }
        Ok(object)
    }
}
