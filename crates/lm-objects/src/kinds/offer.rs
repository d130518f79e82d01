use serde::{Deserialize, Serialize};

use lm_types::{Address, CurrencyAmount, Hash256, LedgerIndex};

use super::first_page;

/// An order to exchange currencies on the decentralized exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferObject {
    /// The account that placed the offer.
    pub account: Address,
    #[serde(default)]
    pub flags: u32,
    /// Sequence number of the transaction that created this offer.
    pub sequence: u32,
    /// Remaining amount the offer creator wants to receive.
    pub taker_pays: CurrencyAmount,
    /// Remaining amount the offer creator is giving.
    pub taker_gets: CurrencyAmount,
    /// The order-book directory that links to this offer.
    pub book_directory: Hash256,
    /// Page hint within the order-book directory.
    #[serde(default = "first_page")]
    pub book_node: String,
    /// Page hint within the owner directory.
    #[serde(default = "first_page")]
    pub owner_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u32>,
    #[serde(rename = "PreviousTxnID")]
    pub previous_txn_id: Hash256,
    pub previous_txn_lgr_seq: LedgerIndex,
    #[serde(rename = "index")]
    pub index: Hash256,
}
