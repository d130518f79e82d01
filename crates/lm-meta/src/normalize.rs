//! Completing a field block so a per-kind schema can decode it.
//!
//! The wire format keeps an object's key and kind on the envelope, one level
//! above the field block, and leaves out bookkeeping fields that a freshly
//! created object does not have yet. Per-kind schemas require all of them,
//! so they are copied or synthesized into the record before decoding.

use std::ops::Deref;

use serde_json::{Map, Value};

use lm_types::{EntryTypeTag, Hash256, LedgerIndex, ObjectIdentifier};

use crate::error::{MetaError, MetaResult};
use crate::node::WrapperKind;

pub const LEDGER_ENTRY_TYPE: &str = "LedgerEntryType";
pub const LEDGER_INDEX: &str = "LedgerIndex";
/// Field name schemas use for the object's key.
pub const INDEX: &str = "index";
pub const PREVIOUS_TXN_ID: &str = "PreviousTxnID";
pub const PREVIOUS_TXN_LGR_SEQ: &str = "PreviousTxnLgrSeq";

/// A field block with identity and bookkeeping fields filled in.
///
/// Values are never shared: every transform returns a new record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompleteRecord(Map<String, Value>);

impl CompleteRecord {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    pub(crate) fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub(crate) fn set(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }

    pub(crate) fn set_if_absent(&mut self, field: &str, value: Value) {
        match self.0.get(field) {
            None | Some(Value::Null) => self.set(field, value),
            Some(_) => {}
        }
    }
}

impl Deref for CompleteRecord {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The previous-transaction fields of an envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bookkeeping {
    pub previous_txn_id: Hash256,
    pub previous_txn_lgr_seq: LedgerIndex,
}

impl Default for Bookkeeping {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl Bookkeeping {
    /// The all-zero hash and ledger zero.
    pub fn placeholder() -> Self {
        Self {
            previous_txn_id: Hash256::zero(),
            previous_txn_lgr_seq: LedgerIndex::ZERO,
        }
    }

    /// Bookkeeping values to inject into a block of the given wrapper kind.
    ///
    /// Only modified-node envelopes carry these fields one level up; for
    /// created and deleted nodes the placeholder is used.
    pub fn for_envelope(kind: WrapperKind, envelope: &Map<String, Value>) -> MetaResult<Self> {
        match kind {
            WrapperKind::Created | WrapperKind::Deleted => Ok(Self::placeholder()),
            WrapperKind::Modified => Self::from_envelope(envelope),
        }
    }

    /// Read `PreviousTxnID` / `PreviousTxnLgrSeq`, using the placeholder for
    /// whichever is absent.
    pub fn from_envelope(envelope: &Map<String, Value>) -> MetaResult<Self> {
        let previous_txn_id = match envelope.get(PREVIOUS_TXN_ID) {
            None | Some(Value::Null) => Hash256::zero(),
            Some(Value::String(s)) => s.parse().map_err(|e| {
                MetaError::malformed(format!("{PREVIOUS_TXN_ID} {s:?}: {e}"))
            })?,
            Some(other) => {
                return Err(MetaError::malformed(format!(
                    "{PREVIOUS_TXN_ID} must be a string, got {other}"
                )))
            }
        };

        let previous_txn_lgr_seq = match envelope.get(PREVIOUS_TXN_LGR_SEQ) {
            None | Some(Value::Null) => LedgerIndex::ZERO,
            Some(value) => value
                .as_u64()
                .and_then(|seq| u32::try_from(seq).ok())
                .map(LedgerIndex::new)
                .ok_or_else(|| {
                    MetaError::malformed(format!(
                        "{PREVIOUS_TXN_LGR_SEQ} must be an unsigned 32-bit integer, got {value}"
                    ))
                })?,
        };

        Ok(Self {
            previous_txn_id,
            previous_txn_lgr_seq,
        })
    }
}

/// Read the object's key and kind from an envelope.
///
/// Both are mandatory on every affected node, decodable or not.
pub fn extract_identifier(envelope: &Map<String, Value>) -> MetaResult<ObjectIdentifier> {
    let entry_type = match envelope.get(LEDGER_ENTRY_TYPE) {
        Some(Value::String(tag)) => EntryTypeTag::from(tag.as_str()),
        Some(other) => {
            return Err(MetaError::malformed(format!(
                "{LEDGER_ENTRY_TYPE} must be a string, got {other}"
            )))
        }
        None => return Err(MetaError::malformed(format!("missing {LEDGER_ENTRY_TYPE}"))),
    };

    let ledger_index = match envelope.get(LEDGER_INDEX) {
        Some(Value::String(hash)) => hash
            .parse::<Hash256>()
            .map_err(|e| MetaError::malformed(format!("{LEDGER_INDEX} {hash:?}: {e}")))?,
        Some(other) => {
            return Err(MetaError::malformed(format!(
                "{LEDGER_INDEX} must be a string, got {other}"
            )))
        }
        None => {
            return Err(MetaError::malformed(format!(
                "missing {LEDGER_INDEX} on {entry_type} node"
            )))
        }
    };

    Ok(ObjectIdentifier {
        ledger_index,
        entry_type,
    })
}

/// Complete `fragment` for decoding.
///
/// The identifier is always written under the names schemas expect,
/// replacing anything already there. Bookkeeping fields are only filled
/// when the fragment lacks them.
pub fn normalize(
    fragment: &Map<String, Value>,
    identifier: &ObjectIdentifier,
    bookkeeping: &Bookkeeping,
) -> CompleteRecord {
    let mut record = CompleteRecord::from_fields(fragment.clone());
    record.set(INDEX, Value::String(identifier.ledger_index.to_hex()));
    record.set(
        LEDGER_ENTRY_TYPE,
        Value::String(identifier.entry_type.as_str().to_string()),
    );
    record.set_if_absent(
        PREVIOUS_TXN_ID,
        Value::String(bookkeeping.previous_txn_id.to_hex()),
    );
    record.set_if_absent(
        PREVIOUS_TXN_LGR_SEQ,
        Value::from(bookkeeping.previous_txn_lgr_seq.value()),
    );
    record
}
