//! Decoded affected-node types.

use std::fmt;

use serde::{Deserialize, Serialize};

use lm_objects::LedgerObject;
use lm_types::{Hash256, LedgerIndex, ObjectIdentifier};

/// Which of the three wrapper objects an affected node arrived in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WrapperKind {
    Created,
    Modified,
    Deleted,
}

impl WrapperKind {
    /// The single key wrapping the envelope in an `AffectedNodes` element.
    pub fn wrapper_key(&self) -> &'static str {
        match self {
            Self::Created => "CreatedNode",
            Self::Modified => "ModifiedNode",
            Self::Deleted => "DeletedNode",
        }
    }

    pub fn from_wrapper_key(key: &str) -> Option<Self> {
        match key {
            "CreatedNode" => Some(Self::Created),
            "ModifiedNode" => Some(Self::Modified),
            "DeletedNode" => Some(Self::Deleted),
            _ => None,
        }
    }

    /// The field block holding the object's state for this kind.
    pub fn state_block(&self) -> &'static str {
        match self {
            Self::Created => "NewFields",
            Self::Modified | Self::Deleted => "FinalFields",
        }
    }
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.wrapper_key())
    }
}

/// An object the transaction created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreatedNode {
    #[serde(flatten)]
    pub identifier: ObjectIdentifier,
    #[serde(rename = "NewFields", skip_serializing_if = "Option::is_none")]
    pub new_state: Option<LedgerObject>,
}

/// An object the transaction removed from the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeletedNode {
    #[serde(flatten)]
    pub identifier: ObjectIdentifier,
    /// State immediately before deletion.
    #[serde(rename = "FinalFields", skip_serializing_if = "Option::is_none")]
    pub final_state: Option<LedgerObject>,
}

/// An object the transaction changed in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModifiedNode {
    #[serde(flatten)]
    pub identifier: ObjectIdentifier,
    #[serde(rename = "FinalFields", skip_serializing_if = "Option::is_none")]
    pub final_state: Option<LedgerObject>,
    /// State before the transaction; absent when no field changed.
    #[serde(rename = "PreviousFields", skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<LedgerObject>,
    #[serde(rename = "PreviousTxnID")]
    pub previous_txn_id: Hash256,
    #[serde(rename = "PreviousTxnLgrSeq")]
    pub previous_txn_lgr_seq: LedgerIndex,
}

/// One decoded entry of a transaction's `AffectedNodes` array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum AffectedNode {
    #[serde(rename = "CreatedNode")]
    Created(CreatedNode),
    #[serde(rename = "ModifiedNode")]
    Modified(ModifiedNode),
    #[serde(rename = "DeletedNode")]
    Deleted(DeletedNode),
}

impl AffectedNode {
    pub fn kind(&self) -> WrapperKind {
        match self {
            Self::Created(_) => WrapperKind::Created,
            Self::Modified(_) => WrapperKind::Modified,
            Self::Deleted(_) => WrapperKind::Deleted,
        }
    }

    pub fn identifier(&self) -> &ObjectIdentifier {
        match self {
            Self::Created(n) => &n.identifier,
            Self::Modified(n) => &n.identifier,
            Self::Deleted(n) => &n.identifier,
        }
    }

    /// The most recent state carried by this node: new state for created
    /// objects, final state otherwise.
    pub fn latest_state(&self) -> Option<&LedgerObject> {
        match self {
            Self::Created(n) => n.new_state.as_ref(),
            Self::Modified(n) => n.final_state.as_ref(),
            Self::Deleted(n) => n.final_state.as_ref(),
        }
    }

    /// `false` for identity-only nodes.
    pub fn is_decoded(&self) -> bool {
        self.latest_state().is_some()
    }
}
