// src/rpc.rs
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use crate::assets::AssetProvider;
use crate::error::SummaryError;
use crate::models::{AssetDescriptor, Transaction};
use crate::parser::{decode_transaction, RawTransaction};

/// HTTP client for the chain explorer API
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    client: Client,
    base_url: String,
}

impl ExplorerClient {
    pub fn new(base_url: &str) -> Result<Self, SummaryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SummaryError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("📡 GET {}", url);

        let resp = self.client.get(&url).send().await?;
        if resp.status() != StatusCode::OK {
            return Err(SummaryError::Explorer {
                status: resp.status().as_u16(),
                url,
            });
        }

        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch a transaction with its spent outputs already resolved
    pub async fn get_transaction(&self, tx_id: &str) -> Result<Transaction, SummaryError> {
        let raw: RawTransaction = self.get_json(&format!("/v2/transactions/{}", tx_id)).await?;
        info!(
            "📩 Fetched tx {} ({} inputs, {} outputs)",
            raw.id,
            raw.inputs.as_ref().map_or(0, Vec::len),
            raw.outputs.as_ref().map_or(0, Vec::len)
        );
        Ok(decode_transaction(raw))
    }
}

#[async_trait]
impl AssetProvider for ExplorerClient {
    async fn asset_description(&self, asset_id: &str) -> Result<AssetDescriptor, SummaryError> {
        match self.get_json(&format!("/v2/assets/{}", asset_id)).await {
            Err(SummaryError::Explorer { status: 404, .. }) => {
                Err(SummaryError::UnknownAsset(asset_id.to_string()))
            }
            res => res,
        }
    }
}
