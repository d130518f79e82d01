use serde::{Deserialize, Serialize};

use lm_types::{Address, Hash256, Issue, IssuedCurrencyAmount, LedgerIndex};

/// An automated market maker pool for one asset pair.
///
/// AMM entries are created by pseudo-transactions and may carry no
/// previous-transaction bookkeeping at all, so those fields are optional
/// here unlike on every other kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmmObject {
    pub asset: Issue,
    pub asset2: Issue,
    #[serde(rename = "AMMAccount")]
    pub amm_account: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auction_slot: Option<AuctionSlot>,
    #[serde(rename = "LPTokenBalance")]
    pub lp_token_balance: IssuedCurrencyAmount,
    /// Fee in units of 1/100,000; at most 1000 (1%).
    #[serde(default)]
    pub trading_fee: u16,
    #[serde(default)]
    pub vote_slots: Vec<VoteEntryWrapper>,
    #[serde(default)]
    pub flags: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_node: Option<String>,
    #[serde(rename = "PreviousTxnID", default, skip_serializing_if = "Option::is_none")]
    pub previous_txn_id: Option<Hash256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_txn_lgr_seq: Option<LedgerIndex>,
    #[serde(rename = "index")]
    pub index: Hash256,
}

impl AmmObject {
    /// The vote entries with their wire wrapper stripped.
    pub fn votes(&self) -> impl Iterator<Item = &VoteEntry> {
        self.vote_slots.iter().map(|slot| &slot.vote_entry)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEntryWrapper {
    #[serde(rename = "VoteEntry")]
    pub vote_entry: VoteEntry,
}

/// One liquidity provider's vote on the trading fee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoteEntry {
    #[serde(alias = "account")]
    pub account: Address,
    #[serde(alias = "trading_fee", default)]
    pub trading_fee: u16,
    #[serde(alias = "vote_weight")]
    pub vote_weight: u32,
}

/// The current holder of the discounted-fee auction slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuctionSlot {
    pub account: Address,
    #[serde(default)]
    pub auth_accounts: Vec<AuthAccountWrapper>,
    #[serde(default)]
    pub discounted_fee: u16,
    pub price: IssuedCurrencyAmount,
    pub expiration: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthAccountWrapper {
    #[serde(rename = "AuthAccount")]
    pub auth_account: AuthAccount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthAccount {
    pub account: Address,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn amm_json() -> serde_json::Value {
        json!({
            "AMMAccount": "rE54zDvgnghAoPopCgvtiqWNq3dU5y836S",
            "Asset": {"currency": "XRP"},
            "Asset2": {"currency": "TST", "issuer": "rP9jPyP5kyvFRb6ZiRghAGw5u8SGAmU4bd"},
            "AuctionSlot": {
                "Account": "rJVUeRqDFNs2xqA7ncVE6ZoAhPUoaJJSQm",
                "AuthAccounts": [
                    {"AuthAccount": {"Account": "rMKXGCbJ5d8LbrqthdG46q3f969MVK2Qeg"}},
                    {"AuthAccount": {"Account": "rBepJuTLFJt3WmtLXYAxSjtBWAeQxVbncv"}}
                ],
                "DiscountedFee": 0,
                "Expiration": 721870180,
                "Price": {
                    "currency": "039C99CD9AB0B70B32ECDA51EAAE471625608EA2",
                    "issuer": "rE54zDvgnghAoPopCgvtiqWNq3dU5y836S",
                    "value": "0.8696263565463045"
                }
            },
            "Flags": 0,
            "LPTokenBalance": {
                "currency": "039C99CD9AB0B70B32ECDA51EAAE471625608EA2",
                "issuer": "rE54zDvgnghAoPopCgvtiqWNq3dU5y836S",
                "value": "71150.53584131501"
            },
            "TradingFee": 600,
            "VoteSlots": [
                {"VoteEntry": {
                    "Account": "rJVUeRqDFNs2xqA7ncVE6ZoAhPUoaJJSQm",
                    "TradingFee": 600,
                    "VoteWeight": 100000
                }}
            ],
            "index": "0".repeat(64)
        })
    }

    #[test]
    fn decodes_without_bookkeeping_fields() {
        let amm: AmmObject = serde_json::from_value(amm_json()).unwrap();
        assert_eq!(amm.trading_fee, 600);
        assert_eq!(amm.asset, Issue::xrp());
        assert!(amm.previous_txn_id.is_none());
        assert_eq!(amm.auction_slot.as_ref().unwrap().auth_accounts.len(), 2);
    }

    #[test]
    fn votes_are_unwrapped() {
        let amm: AmmObject = serde_json::from_value(amm_json()).unwrap();
        let votes: Vec<_> = amm.votes().collect();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].vote_weight, 100000);
    }

    #[test]
    fn vote_entry_accepts_snake_case_aliases() {
        let vote: VoteEntry = serde_json::from_value(json!({
            "account": "rE54zDvgnghAoPopCgvtiqWNq3dU5y836S",
            "vote_weight": 1
        }))
        .unwrap();
        assert_eq!(vote.trading_fee, 0);
        assert_eq!(vote.vote_weight, 1);
    }
}
