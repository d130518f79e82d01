use serde::{Deserialize, Serialize};

use lm_types::{Address, Hash256, LedgerIndex};

use super::first_page;

/// An account sequence number set aside for later use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TicketObject {
    pub account: Address,
    #[serde(default)]
    pub flags: u32,
    #[serde(default = "first_page")]
    pub owner_node: String,
    pub ticket_sequence: u32,
    #[serde(rename = "PreviousTxnID")]
    pub previous_txn_id: Hash256,
    pub previous_txn_lgr_seq: LedgerIndex,
    #[serde(rename = "index")]
    pub index: Hash256,
}
