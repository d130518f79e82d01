use serde::{Deserialize, Serialize};

use lm_types::{Address, Hash256, LedgerIndex, XrpAmount};

/// An account: its XRP balance, sequence, and settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRootObject {
    pub account: Address,
    pub balance: XrpAmount,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub owner_count: u32,
    pub sequence: u32,
    #[serde(rename = "PreviousTxnID")]
    pub previous_txn_id: Hash256,
    pub previous_txn_lgr_seq: LedgerIndex,
    #[serde(rename = "AccountTxnID", default, skip_serializing_if = "Option::is_none")]
    pub account_txn_id: Option<Hash256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_key: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_size: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_rate: Option<u32>,
    #[serde(rename = "index")]
    pub index: Hash256,
}
