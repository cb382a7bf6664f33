// src/models.rs
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// Output type id of a fungible (secp256k1) transfer output
pub const SECP_XFER_OUTPUT_ID: u32 = 7;
/// Output type id of a non-fungible transfer output
pub const NFT_XFER_OUTPUT_ID: u32 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    FungibleTransfer,
    NftTransfer,
    Other(u32),
}

impl From<u32> for OutputKind {
    fn from(type_id: u32) -> Self {
        match type_id {
            SECP_XFER_OUTPUT_ID => OutputKind::FungibleTransfer,
            NFT_XFER_OUTPUT_ID => OutputKind::NftTransfer,
            other => OutputKind::Other(other),
        }
    }
}

/// A single UTXO, either created by a transaction or spent by one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    pub asset_id: String,
    pub kind: OutputKind,
    pub amount: Amount,   // zero for NFT outputs
    pub group_id: u32,    // only meaningful for NFT outputs
    pub addresses: Vec<String>,
    pub threshold: u32,
}

/// A spent output, already resolved upstream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Input {
    pub output: Output,
}

#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub memo: Vec<u8>,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub input_totals: BTreeMap<String, Amount>,
}

impl Transaction {
    pub fn spent_outputs(&self) -> impl Iterator<Item = &Output> {
        self.inputs.iter().map(|input| &input.output)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    #[serde(rename = "assetID", alias = "id")]
    pub asset_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    pub denomination: u8,
}

/// Per-asset totals that remember the order assets were first seen in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetTotals {
    order: Vec<String>,
    totals: HashMap<String, Amount>,
}

impl AssetTotals {
    pub fn get(&self, asset_id: &str) -> Option<Amount> {
        self.totals.get(asset_id).copied()
    }

    pub fn asset_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn insert(&mut self, asset_id: &str, amount: Amount) {
        if self.totals.insert(asset_id.to_string(), amount).is_none() {
            self.order.push(asset_id.to_string());
        }
    }
}

/// asset id → addresses that held outputs of that asset
pub type AssetOwners = HashMap<String, BTreeSet<String>>;

/// owner address → NFT group ids
pub type NftBalance = BTreeMap<String, BTreeSet<u32>>;

/// asset id → per-owner NFT groups
pub type NftBalances = BTreeMap<String, NftBalance>;

/// Net change of one asset for the wallet
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary {
    pub asset_id: String,
    pub amount: Amount,
    pub amount_display_value: String,
    pub addresses: BTreeSet<String>, // counterparties, empty when unknown
    pub asset: AssetDescriptor,
}

pub const BASE_TX_TYPE: &str = "transaction";

#[derive(Debug, Clone, Serialize)]
pub struct BaseTxSummary {
    pub id: String,
    pub fee: Amount,
    #[serde(rename = "type")]
    pub tx_type: &'static str,
    pub timestamp: DateTime<Utc>,
    pub memo: String,
    pub tokens: Vec<TokenSummary>,
}

/// Summary plus the wallet's net NFT movements, as served to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub summary: BaseTxSummary,
    pub nfts_received: NftBalances,
    pub nfts_sent: NftBalances,
}
