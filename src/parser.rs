// src/parser.rs
use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::amount::Amount;
use crate::models::{Input, Output, OutputKind, Transaction};

/// Output as returned by the explorer
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOutput {
    #[serde(rename = "assetID")]
    pub asset_id: String,
    pub output_type: u32,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(rename = "groupID", default)]
    pub group_id: u32,
    #[serde(default)]
    pub addresses: Option<Vec<String>>,
    #[serde(default)]
    pub threshold: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawInput {
    pub output: RawOutput,
}

/// Transaction as returned by the explorer. Any list may be missing or null.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub memo: Option<String>, // base64
    #[serde(default)]
    pub inputs: Option<Vec<RawInput>>,
    #[serde(default)]
    pub outputs: Option<Vec<RawOutput>>,
    #[serde(default)]
    pub input_totals: Option<BTreeMap<String, Amount>>,
}

fn decode_output(raw: RawOutput) -> Output {
    Output {
        asset_id: raw.asset_id,
        kind: OutputKind::from(raw.output_type),
        amount: raw.amount.unwrap_or(Amount::ZERO),
        group_id: raw.group_id,
        addresses: raw.addresses.unwrap_or_default(),
        threshold: raw.threshold,
    }
}

/// Turn an explorer transaction into the model, substituting empty
/// collections for anything absent.
pub fn decode_transaction(raw: RawTransaction) -> Transaction {
    let memo = match raw.memo.as_deref() {
        Some(encoded) if !encoded.is_empty() => STANDARD.decode(encoded).unwrap_or_else(|e| {
            warn!("Undecodable memo on tx {}: {}", raw.id, e);
            Vec::new()
        }),
        _ => Vec::new(),
    };

    Transaction {
        id: raw.id,
        timestamp: raw.timestamp,
        memo,
        inputs: raw
            .inputs
            .unwrap_or_default()
            .into_iter()
            .map(|input| Input { output: decode_output(input.output) })
            .collect(),
        outputs: raw
            .outputs
            .unwrap_or_default()
            .into_iter()
            .map(decode_output)
            .collect(),
        input_totals: raw.input_totals.unwrap_or_default(),
    }
}

/// Memo bytes as display text. Padding NULs are dropped.
pub fn parse_memo(memo: &[u8]) -> String {
    String::from_utf8_lossy(memo)
        .trim_end_matches('\0')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_explorer_payload() {
        let raw: RawTransaction = serde_json::from_value(json!({
            "id": "tx1",
            "timestamp": "2021-03-01T12:00:00Z",
            "memo": "aGVsbG8=",
            "inputs": [{
                "output": {
                    "assetID": "A",
                    "outputType": 7,
                    "amount": "100",
                    "addresses": ["me"],
                    "threshold": 1
                }
            }],
            "outputs": [{
                "assetID": "B",
                "outputType": 11,
                "groupID": 3,
                "addresses": ["x"],
                "threshold": 1
            }],
            "inputTotals": { "A": "100" }
        }))
        .unwrap();

        let tx = decode_transaction(raw);
        assert_eq!(tx.id, "tx1");
        assert_eq!(parse_memo(&tx.memo), "hello");
        assert_eq!(tx.inputs[0].output.kind, OutputKind::FungibleTransfer);
        assert_eq!(tx.inputs[0].output.amount, Amount::from_u64(100));
        assert_eq!(tx.outputs[0].kind, OutputKind::NftTransfer);
        assert_eq!(tx.outputs[0].group_id, 3);
        assert_eq!(tx.outputs[0].amount, Amount::ZERO);
        assert_eq!(tx.input_totals["A"], Amount::from_u64(100));
    }

    #[test]
    fn missing_lists_become_empty() {
        let raw: RawTransaction = serde_json::from_value(json!({
            "id": "tx2",
            "timestamp": "2021-03-01T12:00:00Z",
            "inputs": null
        }))
        .unwrap();

        let tx = decode_transaction(raw);
        assert!(tx.inputs.is_empty());
        assert!(tx.outputs.is_empty());
        assert!(tx.input_totals.is_empty());
        assert!(tx.memo.is_empty());
    }

    #[test]
    fn empty_amount_string_is_rejected() {
        let res = serde_json::from_value::<RawTransaction>(json!({
            "id": "tx3",
            "timestamp": "2021-03-01T12:00:00Z",
            "outputs": [{
                "assetID": "A",
                "outputType": 7,
                "amount": "",
                "addresses": ["me"],
                "threshold": 1
            }]
        }));
        assert!(res.is_err());
    }

    #[test]
    fn unknown_output_types_are_kept_as_other() {
        assert_eq!(OutputKind::from(6), OutputKind::Other(6));
    }

    #[test]
    fn memo_trims_padding() {
        assert_eq!(parse_memo(b"hi\0\0"), "hi");
        assert_eq!(parse_memo(&[]), "");
    }
}
