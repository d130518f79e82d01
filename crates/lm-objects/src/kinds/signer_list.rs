use serde::{Deserialize, Serialize};

use lm_types::{Address, Hash256, LedgerIndex};

use super::first_page;

/// A multi-signing configuration for an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignerListObject {
    #[serde(default)]
    pub flags: u32,
    #[serde(default = "first_page")]
    pub owner_node: String,
    pub signer_quorum: u32,
    pub signer_entries: Vec<SignerEntryWrapper>,
    /// Always zero; reserved for multiple lists per account.
    #[serde(rename = "SignerListID", default)]
    pub signer_list_id: u32,
    #[serde(rename = "PreviousTxnID")]
    pub previous_txn_id: Hash256,
    pub previous_txn_lgr_seq: LedgerIndex,
    #[serde(rename = "index")]
    pub index: Hash256,
}

/// The ledger nests each signer entry one level deep.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerEntryWrapper {
    #[serde(rename = "SignerEntry")]
    pub signer_entry: SignerEntry,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignerEntry {
    pub account: Address,
    pub signer_weight: u16,
}
