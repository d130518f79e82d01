use serde::{Deserialize, Serialize};

use lm_types::{Hash256, IssuedCurrencyAmount, LedgerIndex};

/// A trust line between two accounts.
///
/// The balance is expressed from the low account's point of view: positive
/// means the low account holds the currency, negative means the high
/// account does. Its issuer is always the neutral account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RippleStateObject {
    pub balance: IssuedCurrencyAmount,
    #[serde(default)]
    pub flags: u32,
    pub low_limit: IssuedCurrencyAmount,
    pub high_limit: IssuedCurrencyAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_quality_in: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_quality_out: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_quality_in: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_quality_out: Option<u32>,
    #[serde(rename = "PreviousTxnID")]
    pub previous_txn_id: Hash256,
    pub previous_txn_lgr_seq: LedgerIndex,
    #[serde(rename = "index")]
    pub index: Hash256,
}

impl RippleStateObject {
    /// `lsfLowReserve`: the low account contributes to the owner reserve.
    pub const LOW_RESERVE: u32 = 0x0001_0000;
    /// `lsfHighReserve`: the high account contributes to the owner reserve.
    pub const HIGH_RESERVE: u32 = 0x0002_0000;

    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag == flag
    }
}
