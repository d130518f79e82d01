//! The `meta` object attached to a validated transaction.

use serde::Serialize;
use serde_json::{Map, Value};

use lm_types::CurrencyAmount;

use crate::batch::BatchFailure;
use crate::config::DecoderConfig;
use crate::decoder::MetadataDecoder;
use crate::error::{MetaError, MetaResult};
use crate::node::{AffectedNode, ModifiedNode};

const AFFECTED_NODES: &str = "AffectedNodes";
const TRANSACTION_INDEX: &str = "TransactionIndex";
const TRANSACTION_RESULT: &str = "TransactionResult";
const DELIVERED_AMOUNT: &str = "DeliveredAmount";
const DELIVERED_AMOUNT_LEGACY: &str = "delivered_amount";
/// Reported for partial payments executed before the amount was recorded.
const UNAVAILABLE: &str = "unavailable";

/// A transaction's decoded metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionMetadata {
    /// Touched objects, in the order the ledger listed them.
    pub affected_nodes: Vec<AffectedNode>,
    /// Position of the transaction within its ledger.
    pub transaction_index: u32,
    /// Engine result code, e.g. `tesSUCCESS`.
    pub transaction_result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_amount: Option<CurrencyAmount>,
}

impl TransactionMetadata {
    pub fn is_success(&self) -> bool {
        self.transaction_result == "tesSUCCESS"
    }

    pub fn modified_nodes(&self) -> impl Iterator<Item = &ModifiedNode> {
        self.affected_nodes.iter().filter_map(|node| match node {
            AffectedNode::Modified(n) => Some(n),
            _ => None,
        })
    }
}

impl MetadataDecoder {
    /// Decode a whole metadata object, failing on the first bad node.
    pub fn decode_metadata(&self, meta: &Value) -> MetaResult<TransactionMetadata> {
        let config = DecoderConfig::default();
        let (metadata, _) = self.decode_metadata_with(meta, &config)?;
        Ok(metadata)
    }

    /// Decode a metadata object with `config`'s batch policy and workers.
    ///
    /// Under [`SkipInvalid`](crate::BatchPolicy::SkipInvalid) the dropped
    /// nodes are returned next to the metadata.
    pub fn decode_metadata_with(
        &self,
        meta: &Value,
        config: &DecoderConfig,
    ) -> MetaResult<(TransactionMetadata, Vec<BatchFailure>)> {
        let meta = meta
            .as_object()
            .ok_or_else(|| MetaError::malformed("transaction metadata must be an object"))?;

        let elements = match meta.get(AFFECTED_NODES) {
            Some(Value::Array(elements)) => elements,
            Some(other) => {
                return Err(MetaError::malformed(format!(
                    "{AFFECTED_NODES} must be an array, got {other}"
                )))
            }
            None => return Err(MetaError::malformed(format!("missing {AFFECTED_NODES}"))),
        };

        let transaction_index = transaction_index(meta)?;
        let transaction_result = match meta.get(TRANSACTION_RESULT) {
            Some(Value::String(result)) => result.clone(),
            _ => {
                return Err(MetaError::malformed(format!(
                    "missing or non-string {TRANSACTION_RESULT}"
                )))
            }
        };
        let delivered_amount = delivered_amount(meta)?;

        let outcome = self.decode_batch_with(elements, config)?;

        let metadata = TransactionMetadata {
            affected_nodes: outcome.nodes,
            transaction_index,
            transaction_result,
            delivered_amount,
        };
        Ok((metadata, outcome.failures))
    }
}

fn transaction_index(meta: &Map<String, Value>) -> MetaResult<u32> {
    meta.get(TRANSACTION_INDEX)
        .and_then(Value::as_u64)
        .and_then(|index| u32::try_from(index).ok())
        .ok_or_else(|| {
            MetaError::malformed(format!(
                "{TRANSACTION_INDEX} must be an unsigned 32-bit integer"
            ))
        })
}

/// `DeliveredAmount`, falling back to the lower-case field rippled also emits.
///
/// A field holding `null` or `"unavailable"` defers to the next one.
fn delivered_amount(meta: &Map<String, Value>) -> MetaResult<Option<CurrencyAmount>> {
    let value = [DELIVERED_AMOUNT, DELIVERED_AMOUNT_LEGACY]
        .into_iter()
        .find_map(|field| {
            meta.get(field)
                .filter(|v| !v.is_null() && v.as_str() != Some(UNAVAILABLE))
        });

    match value {
        None => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| MetaError::malformed(format!("{DELIVERED_AMOUNT}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use lm_objects::LedgerObject;
    use lm_types::XrpAmount;

    use super::*;

    fn offer_deletion() -> Value {
        json!({
            "AffectedNodes": [{
                "DeletedNode": {
                    "FinalFields": {
                        "Account": "r9ZoLsJHzMMJLpvsViWQ4Jgx17N8cz1997",
                        "BookDirectory":
                            "A6D5D1C1CC92D56FDDFD4434FB10BD31F63EB991DA3C756653071AFD498D0000",
                        "BookNode": "0000000000000000",
                        "Flags": 0,
                        "OwnerNode": "0000000000000000",
                        "PreviousTxnID":
                            "DB028A461E98B0398CAD65F2871B381A6D0B9A21662CA5B033438D83C518C0F2",
                        "PreviousTxnLgrSeq": 35686129,
                        "Sequence": 7,
                        "TakerGets": {
                            "currency": "EUR",
                            "issuer": "rhub8VRN55s94qWKDv6jmDy1pUykJzF3wq",
                            "value": "2.5"
                        },
                        "TakerPays": {
                            "currency": "ETH",
                            "issuer": "rcA8X3TVMST1n3CJeAdGk1RdRCHii7N2h",
                            "value": "0.05"
                        }
                    },
                    "LedgerEntryType": "Offer",
                    "LedgerIndex":
                        "6AA7E5121FEB456F0A899E3D6F25D62ABB408BB67B91C9270E13714401ED72B5"
                }
            }],
            "DeliveredAmount": {
                "currency": "GCB",
                "issuer": "rHaans8PtgwbacHvXAL3u6TG28gTAtCwr8",
                "value": "2.788706"
            },
            "TransactionIndex": 38,
            "TransactionResult": "tesSUCCESS",
            "delivered_amount": {
                "currency": "GCB",
                "issuer": "rHaans8PtgwbacHvXAL3u6TG28gTAtCwr8",
                "value": "2.788706"
            }
        })
    }

    #[test]
    fn decodes_full_metadata() {
        let meta = MetadataDecoder::default().decode_metadata(&offer_deletion()).unwrap();
        assert_eq!(meta.transaction_index, 38);
        assert!(meta.is_success());
        assert_eq!(meta.affected_nodes.len(), 1);

        let AffectedNode::Deleted(node) = &meta.affected_nodes[0] else {
            panic!("expected DeletedNode");
        };
        let Some(LedgerObject::Offer(offer)) = &node.final_state else {
            panic!("expected Offer");
        };
        assert_eq!(offer.previous_txn_lgr_seq.value(), 35686129);

        let Some(CurrencyAmount::Issued(delivered)) = meta.delivered_amount else {
            panic!("expected issued delivered amount");
        };
        assert_eq!(delivered.value, "2.788706");
    }

    #[test]
    fn delivered_amount_falls_back_and_handles_unavailable() {
        let mut raw = offer_deletion();
        raw.as_object_mut().unwrap().remove("DeliveredAmount");
        raw["delivered_amount"] = json!("1000");
        let meta = MetadataDecoder::default().decode_metadata(&raw).unwrap();
        assert_eq!(
            meta.delivered_amount,
            Some(CurrencyAmount::Xrp(XrpAmount::from_drops(1000)))
        );

        raw["delivered_amount"] = json!("unavailable");
        let meta = MetadataDecoder::default().decode_metadata(&raw).unwrap();
        assert!(meta.delivered_amount.is_none());

        raw.as_object_mut().unwrap().remove("delivered_amount");
        let meta = MetadataDecoder::default().decode_metadata(&raw).unwrap();
        assert!(meta.delivered_amount.is_none());
    }

    #[test]
    fn unavailable_delivered_amount_defers_to_legacy_field() {
        let mut raw = offer_deletion();
        raw["DeliveredAmount"] = json!("unavailable");
        raw["delivered_amount"] = json!("2500");
        let meta = MetadataDecoder::default().decode_metadata(&raw).unwrap();
        assert_eq!(
            meta.delivered_amount,
            Some(CurrencyAmount::Xrp(XrpAmount::from_drops(2500)))
        );

        raw["delivered_amount"] = json!("unavailable");
        let meta = MetadataDecoder::default().decode_metadata(&raw).unwrap();
        assert!(meta.delivered_amount.is_none());
    }

    #[test]
    fn missing_envelope_fields_are_malformed() {
        for field in ["AffectedNodes", "TransactionIndex", "TransactionResult"] {
            let mut raw = offer_deletion();
            raw.as_object_mut().unwrap().remove(field);
            let err = MetadataDecoder::default().decode_metadata(&raw).unwrap_err();
            assert!(err.is_malformed(), "{field}");
        }

        let mut raw = offer_deletion();
        raw["TransactionIndex"] = json!(-1);
        assert!(MetadataDecoder::default().decode_metadata(&raw).is_err());
    }

    #[test]
    fn bad_node_fails_whole_metadata_unless_skipping() {
        let mut raw = offer_deletion();
        raw["AffectedNodes"]
            .as_array_mut()
            .unwrap()
            .insert(0, json!({"ModifiedNode": {"LedgerEntryType": "Offer"}}));

        let err = MetadataDecoder::default().decode_metadata(&raw).unwrap_err();
        assert!(matches!(err, MetaError::AtPosition { position: 0, .. }));

        let (meta, failures) = MetadataDecoder::default()
            .decode_metadata_with(&raw, &DecoderConfig::lenient())
            .unwrap();
        assert_eq!(meta.affected_nodes.len(), 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].position, 0);
    }

    #[test]
    fn serializes_in_wire_field_names() {
        let meta = MetadataDecoder::default().decode_metadata(&offer_deletion()).unwrap();
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["TransactionIndex"], json!(38));
        assert_eq!(value["TransactionResult"], json!("tesSUCCESS"));
        assert_eq!(
            value["AffectedNodes"][0]["DeletedNode"]["LedgerEntryType"],
            json!("Offer")
        );
        assert_eq!(meta.modified_nodes().count(), 0);
    }
}
