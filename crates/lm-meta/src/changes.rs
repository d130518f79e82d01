//! Field-level report of what a transaction changed on an object.
//!
//! Both snapshots of a modified node are serialized back to their wire
//! field maps and compared key by key. A `null` field counts as absent.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use lm_objects::LedgerObject;

use crate::error::{MetaError, MetaResult};
use crate::node::ModifiedNode;

/// The changes between two versions of an object, ordered by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldChanges {
    pub changes: Vec<FieldChange>,
}

impl FieldChanges {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn additions(&self) -> usize {
        self.count(|c| matches!(c, FieldChange::Added { .. }))
    }

    pub fn removals(&self) -> usize {
        self.count(|c| matches!(c, FieldChange::Removed { .. }))
    }

    pub fn modifications(&self) -> usize {
        self.count(|c| matches!(c, FieldChange::Modified { .. }))
    }

    /// The change to `field`, if any.
    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.changes.iter().find(|c| c.field() == field)
    }

    fn count(&self, pred: impl Fn(&FieldChange) -> bool) -> usize {
        self.changes.iter().filter(|c| pred(*c)).count()
    }
}

/// A single field difference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "lowercase")]
pub enum FieldChange {
    /// Present only after the transaction.
    Added { field: String, value: Value },
    /// Present only before the transaction.
    Removed { field: String, value: Value },
    Modified {
        field: String,
        previous: Value,
        current: Value,
    },
}

impl FieldChange {
    pub fn field(&self) -> &str {
        match self {
            Self::Added { field, .. } | Self::Removed { field, .. } => field,
            Self::Modified { field, .. } => field,
        }
    }
}

/// Compare two field maps.
pub fn diff_records(
    previous: &Map<String, Value>,
    current: &Map<String, Value>,
) -> FieldChanges {
    let present = |map: &Map<String, Value>, field: &str| -> Option<Value> {
        map.get(field).filter(|v| !v.is_null()).cloned()
    };

    let fields: BTreeSet<&String> = previous.keys().chain(current.keys()).collect();
    let changes = fields
        .into_iter()
        .filter_map(|field| {
            let field_name = field.clone();
            match (present(previous, field.as_str()), present(current, field.as_str())) {
                (None, None) => None,
                (None, Some(value)) => Some(FieldChange::Added {
                    field: field_name,
                    value,
                }),
                (Some(value), None) => Some(FieldChange::Removed {
                    field: field_name,
                    value,
                }),
                (Some(previous), Some(current)) if previous != current => {
                    Some(FieldChange::Modified {
                        field: field_name,
                        previous,
                        current,
                    })
                }
                (Some(_), Some(_)) => None,
            }
        })
        .collect();

    FieldChanges { changes }
}

/// What the transaction changed on `node`.
///
/// `None` when the node lacks either snapshot: identity-only kinds, and
/// modifications that reported no previous fields.
pub fn field_changes(node: &ModifiedNode) -> MetaResult<Option<FieldChanges>> {
    let (Some(previous), Some(current)) = (&node.previous_state, &node.final_state) else {
        return Ok(None);
    };
    Ok(Some(diff_records(&to_fields(previous)?, &to_fields(current)?)))
}

fn to_fields(object: &LedgerObject) -> MetaResult<Map<String, Value>> {
    match serde_json::to_value(object) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(MetaError::Serialization(format!(
            "{} serialized to a non-object: {other}",
            object.entry_type()
        ))),
        Err(e) => Err(MetaError::Serialization(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::decoder::MetadataDecoder;
    use crate::node::AffectedNode;

    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn identical_records_have_no_changes() {
        let record = map(json!({"a": 1, "b": "x"}));
        assert!(diff_records(&record, &record).is_empty());
    }

    #[test]
    fn classifies_each_kind_of_change() {
        let previous = map(json!({"Balance": "10", "Domain": "AB", "Flags": 0}));
        let current = map(json!({"Balance": "5", "EmailHash": "CD", "Flags": 0}));
        let diff = diff_records(&previous, &current);

        assert_eq!(diff.len(), 3);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.removals(), 1);
        assert_eq!(diff.modifications(), 1);
        assert_eq!(
            diff.changes.iter().map(FieldChange::field).collect::<Vec<_>>(),
            vec!["Balance", "Domain", "EmailHash"]
        );
        assert_eq!(
            diff.get("Balance"),
            Some(&FieldChange::Modified {
                field: "Balance".into(),
                previous: json!("10"),
                current: json!("5"),
            })
        );
    }

    #[test]
    fn null_counts_as_absent() {
        let previous = map(json!({"Domain": null}));
        let current = map(json!({"Domain": "AB"}));
        let diff = diff_records(&previous, &current);
        assert_eq!(diff.additions(), 1);
        assert!(diff_records(&previous, &map(json!({}))).is_empty());
    }

    #[test]
    fn modified_account_root_reports_balance_and_sequence() {
        let node = MetadataDecoder::default()
            .decode_element(&json!({"ModifiedNode": {
                "FinalFields": {
                    "Account": "rphDLpCwJyPEBuZccdBCWPUgAXUd96dUCJ",
                    "Balance": "29999999940",
                    "Flags": 8388608,
                    "OwnerCount": 0,
                    "Sequence": 57013
                },
                "LedgerEntryType": "AccountRoot",
                "LedgerIndex": "EC6AA5542F739EE340315EAC0B67ABCC8B5533DD683AE3C9AD1C311240D86317",
                "PreviousFields": {"Balance": "29999999950", "Sequence": 57012},
                "PreviousTxnID": "D1AD67D98F160A7AA518E969803393DEFE0F0132E66205230021DFDDAAE58AA4",
                "PreviousTxnLgrSeq": 109607
            }}))
            .unwrap();
        let AffectedNode::Modified(node) = node else {
            panic!("expected ModifiedNode");
        };

        let diff = field_changes(&node).unwrap().unwrap();
        assert_eq!(diff.len(), 2);
        assert_eq!(diff.modifications(), 2);
        assert_eq!(
            diff.get("Sequence"),
            Some(&FieldChange::Modified {
                field: "Sequence".into(),
                previous: json!(57012),
                current: json!(57013),
            })
        );
    }

    #[test]
    fn node_without_previous_state_has_no_report() {
        let node = MetadataDecoder::default()
            .decode_element(&json!({"ModifiedNode": {
                "LedgerEntryType": "DirectoryNode",
                "LedgerIndex": "2F3A62FD82453F130039DA50D21A2850C073F946795F1B174445DD32791F8593",
                "FinalFields": {"Owner": "rphDLpCwJyPEBuZccdBCWPUgAXUd96dUCJ"}
            }}))
            .unwrap();
        let AffectedNode::Modified(node) = node else {
            panic!("expected ModifiedNode");
        };
        assert!(field_changes(&node).unwrap().is_none());
    }

    #[test]
    fn changes_serialize_with_a_change_tag() {
        let change = FieldChange::Added {
            field: "Domain".into(),
            value: json!("AB"),
        };
        assert_eq!(
            serde_json::to_value(&change).unwrap(),
            json!({"change": "added", "field": "Domain", "value": "AB"})
        );
    }
}
