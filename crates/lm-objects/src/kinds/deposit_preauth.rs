use serde::{Deserialize, Serialize};

use lm_types::{Address, Hash256, LedgerIndex};

use super::first_page;

/// A preauthorization from `account` allowing `authorize` to deposit to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepositPreauthObject {
    pub account: Address,
    pub authorize: Address,
    #[serde(default)]
    pub flags: u32,
    #[serde(default = "first_page")]
    pub owner_node: String,
    #[serde(rename = "PreviousTxnID")]
    pub previous_txn_id: Hash256,
    pub previous_txn_lgr_seq: LedgerIndex,
    #[serde(rename = "index")]
    pub index: Hash256,
}
