use serde::{Deserialize, Serialize};

use lm_types::{Address, Hash256, LedgerIndex, XrpAmount};

use super::first_page;

/// A one-way XRP payment channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PayChannelObject {
    pub account: Address,
    pub destination: Address,
    /// Total XRP set aside in the channel.
    pub amount: XrpAmount,
    /// XRP already paid out; never exceeds `amount`. Absent on a new channel.
    #[serde(default = "no_drops")]
    pub balance: XrpAmount,
    pub public_key: String,
    #[serde(default)]
    pub settle_delay: u32,
    #[serde(default)]
    pub flags: u32,
    #[serde(default = "first_page")]
    pub owner_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_after: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(rename = "PreviousTxnID")]
    pub previous_txn_id: Hash256,
    pub previous_txn_lgr_seq: LedgerIndex,
    #[serde(rename = "index")]
    pub index: Hash256,
}

fn no_drops() -> XrpAmount {
    XrpAmount::from_drops(0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_channel_has_zero_balance() {
        let channel: PayChannelObject = serde_json::from_value(json!({
            "Account": "rK6g2UYc4GpQH8DYdPG7wywyQbxkJpQTTN",
            "Amount": "10000",
            "Destination": "rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn",
            "PublicKey": "32D2471DB72B27E3310F355BB33E339BF26F8392D5A93D3BC0FC3B566612DA0F0A",
            "PreviousTxnID": "0".repeat(64),
            "PreviousTxnLgrSeq": 0,
            "index": "0".repeat(64)
        }))
        .unwrap();
        assert_eq!(channel.balance, XrpAmount::from_drops(0));
        assert_eq!(channel.settle_delay, 0);
        assert_eq!(channel.owner_node, "0000000000000000");
    }
}
