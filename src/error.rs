// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("asset lookup failed for {asset_id}: {source}")]
    AssetLookup {
        asset_id: String,
        #[source]
        source: Box<SummaryError>,
    },

    #[error("unknown asset {0}")]
    UnknownAsset(String),

    #[error("amount overflow for asset {0}")]
    Overflow(String),

    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    #[error("explorer returned HTTP {status} for {url}")]
    Explorer { status: u16, url: String },

    #[error("explorer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid transaction payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl SummaryError {
    /// True when the failure came from a collaborator rather than the input.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            SummaryError::AssetLookup { .. }
                | SummaryError::Explorer { .. }
                | SummaryError::Http(_)
        )
    }
}
