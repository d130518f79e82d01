use serde::{Deserialize, Serialize};

use lm_types::{Address, CurrencyAmount, Hash256, LedgerIndex};

use super::first_page;

/// A deferred payment that its destination can cash for up to `send_max`.
///
/// Unlike an escrow, nothing is set aside when the check is created, so
/// cashing can still fail for lack of funds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckObject {
    pub account: Address,
    pub destination: Address,
    /// No flags are defined for checks; always zero on a live ledger.
    #[serde(default)]
    pub flags: u32,
    pub send_max: CurrencyAmount,
    /// Sequence number of the transaction that created this check.
    pub sequence: u32,
    #[serde(default = "first_page")]
    pub owner_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<u32>,
    /// Seconds since the Ripple epoch after which the check is expired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u32>,
    #[serde(rename = "InvoiceID", default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<Hash256>,
    #[serde(rename = "PreviousTxnID")]
    pub previous_txn_id: Hash256,
    pub previous_txn_lgr_seq: LedgerIndex,
    #[serde(rename = "index")]
    pub index: Hash256,
}
