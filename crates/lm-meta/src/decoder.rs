//! The affected-node decoder.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use lm_objects::{LedgerObject, SchemaDecoder, SerdeSchema};
use lm_types::ObjectIdentifier;

use crate::error::{MetaError, MetaResult};
use crate::node::{AffectedNode, CreatedNode, DeletedNode, ModifiedNode, WrapperKind};
use crate::normalize::{extract_identifier, normalize, Bookkeeping, CompleteRecord};
use crate::overlay::reconstruct_previous;
use crate::registry::DecodabilityRegistry;

const PREVIOUS_FIELDS: &str = "PreviousFields";

/// Turns affected-node envelopes into [`AffectedNode`] values.
///
/// Holds no per-call state; one decoder may serve many threads at once.
#[derive(Clone)]
pub struct MetadataDecoder {
    registry: Arc<DecodabilityRegistry>,
    schema: Arc<dyn SchemaDecoder>,
}

impl Default for MetadataDecoder {
    /// The built-in schemas with the process-wide registry.
    fn default() -> Self {
        Self::with_registry(DecodabilityRegistry::global(), Arc::new(SerdeSchema))
    }
}

impl std::fmt::Debug for MetadataDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataDecoder")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl MetadataDecoder {
    /// A decoder whose registry is built from `schema`'s own catalog.
    pub fn new(schema: Arc<dyn SchemaDecoder>) -> Self {
        let registry = Arc::new(DecodabilityRegistry::from_schema(schema.as_ref()));
        Self { registry, schema }
    }

    pub fn with_registry(
        registry: Arc<DecodabilityRegistry>,
        schema: Arc<dyn SchemaDecoder>,
    ) -> Self {
        Self { registry, schema }
    }

    pub fn registry(&self) -> &DecodabilityRegistry {
        &self.registry
    }

    /// Decode one `AffectedNodes` element: a single-key object whose key
    /// names the wrapper kind.
    pub fn decode_element(&self, element: &Value) -> MetaResult<AffectedNode> {
        let wrapper = element.as_object().ok_or_else(|| {
            MetaError::malformed(format!("affected node must be an object, got {element}"))
        })?;

        let mut entries = wrapper.iter();
        let (key, envelope) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(MetaError::malformed(format!(
                    "affected node must have exactly one key, got {}",
                    wrapper.len()
                )))
            }
        };

        let kind = WrapperKind::from_wrapper_key(key)
            .ok_or_else(|| MetaError::malformed(format!("unknown affected node wrapper {key:?}")))?;
        let envelope = envelope
            .as_object()
            .ok_or_else(|| MetaError::malformed(format!("{key} envelope must be an object")))?;

        self.decode(kind, envelope)
    }

    /// Decode one envelope of the given wrapper kind.
    ///
    /// Fails only on a malformed envelope or when a decodable kind's schema
    /// rejects its fields. Kinds without a schema yield identity-only nodes.
    pub fn decode(
        &self,
        kind: WrapperKind,
        envelope: &Map<String, Value>,
    ) -> MetaResult<AffectedNode> {
        let identifier = extract_identifier(envelope)?;
        match kind {
            WrapperKind::Created => self
                .decode_created(identifier, envelope)
                .map(AffectedNode::Created),
            WrapperKind::Modified => self
                .decode_modified(identifier, envelope)
                .map(AffectedNode::Modified),
            WrapperKind::Deleted => self
                .decode_deleted(identifier, envelope)
                .map(AffectedNode::Deleted),
        }
    }

    fn decode_created(
        &self,
        identifier: ObjectIdentifier,
        envelope: &Map<String, Value>,
    ) -> MetaResult<CreatedNode> {
        // Unrecognized kinds may carry any blocks; they keep identity only.
        let recognized = identifier.entry_type.entry_type().is_some()
            || self.registry.is_decodable(&identifier.entry_type);
        if recognized {
            for unexpected in [WrapperKind::Modified.state_block(), PREVIOUS_FIELDS] {
                if field_block(envelope, unexpected)?.is_some() {
                    return Err(MetaError::malformed(format!(
                        "CreatedNode {} carries {unexpected}",
                        identifier.ledger_index
                    )));
                }
            }
        }

        if !self.is_decodable(&identifier) {
            return Ok(CreatedNode {
                identifier,
                new_state: None,
            });
        }

        let fields = required_block(envelope, WrapperKind::Created.state_block(), &identifier)?;
        let record = normalize(fields, &identifier, &Bookkeeping::placeholder());
        let new_state = self.decode_snapshot(&identifier, &record)?;
        Ok(CreatedNode {
            identifier,
            new_state: Some(new_state),
        })
    }

    fn decode_deleted(
        &self,
        identifier: ObjectIdentifier,
        envelope: &Map<String, Value>,
    ) -> MetaResult<DeletedNode> {
        if !self.is_decodable(&identifier) {
            return Ok(DeletedNode {
                identifier,
                final_state: None,
            });
        }

        let fields = required_block(envelope, WrapperKind::Deleted.state_block(), &identifier)?;
        let record = normalize(fields, &identifier, &Bookkeeping::placeholder());
        let final_state = self.decode_snapshot(&identifier, &record)?;
        Ok(DeletedNode {
            identifier,
            final_state: Some(final_state),
        })
    }

    fn decode_modified(
        &self,
        identifier: ObjectIdentifier,
        envelope: &Map<String, Value>,
    ) -> MetaResult<ModifiedNode> {
        let bookkeeping = Bookkeeping::for_envelope(WrapperKind::Modified, envelope)?;
        let mut node = ModifiedNode {
            identifier,
            final_state: None,
            previous_state: None,
            previous_txn_id: bookkeeping.previous_txn_id,
            previous_txn_lgr_seq: bookkeeping.previous_txn_lgr_seq,
        };

        if !self.is_decodable(&node.identifier) {
            return Ok(node);
        }

        let block = WrapperKind::Modified.state_block();
        let fields = required_block(envelope, block, &node.identifier)?;
        let final_record = normalize(fields, &node.identifier, &bookkeeping);
        node.final_state = Some(self.decode_snapshot(&node.identifier, &final_record)?);

        let delta = field_block(envelope, PREVIOUS_FIELDS)?;
        if let Some(previous_record) = reconstruct_previous(&final_record, delta) {
            let previous_state = self.decode_snapshot(&node.identifier, &previous_record)?;
            node.previous_state = Some(previous_state);
        }
        Ok(node)
    }

    fn is_decodable(&self, identifier: &ObjectIdentifier) -> bool {
        let decodable = self.registry.is_decodable(&identifier.entry_type);
        if !decodable {
            debug!(
                entry_type = %identifier.entry_type,
                ledger_index = %identifier.ledger_index,
                "no schema registered; keeping identity only"
            );
        }
        decodable
    }

    fn decode_snapshot(
        &self,
        identifier: &ObjectIdentifier,
        record: &CompleteRecord,
    ) -> MetaResult<LedgerObject> {
        self.schema
            .decode_typed(&identifier.entry_type, record.fields())
            .map_err(|source| MetaError::TypedDecode {
                entry_type: identifier.entry_type.clone(),
                ledger_index: identifier.ledger_index,
                source,
            })
    }
}

/// A field block, if present. `null` counts as absent.
fn field_block<'a>(
    envelope: &'a Map<String, Value>,
    name: &str,
) -> MetaResult<Option<&'a Map<String, Value>>> {
    match envelope.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(block)) => Ok(Some(block)),
        Some(other) => Err(MetaError::malformed(format!(
            "{name} must be an object, got {other}"
        ))),
    }
}

fn required_block<'a>(
    envelope: &'a Map<String, Value>,
    name: &str,
    identifier: &ObjectIdentifier,
) -> MetaResult<&'a Map<String, Value>> {
    field_block(envelope, name)?.ok_or_else(|| {
        MetaError::malformed(format!(
            "{} node {} has no {name}",
            identifier.entry_type, identifier.ledger_index
        ))
    })
}
