// src/assets.rs
use async_trait::async_trait;
use futures_util::future::try_join_all;
use tracing::debug;

use crate::error::SummaryError;
use crate::models::AssetDescriptor;

/// Source of asset metadata (name, symbol, denomination)
#[async_trait]
pub trait AssetProvider: Send + Sync {
    async fn asset_description(&self, asset_id: &str) -> Result<AssetDescriptor, SummaryError>;
}

/// Fetch descriptors for all `asset_ids` at once.
///
/// Results line up with `asset_ids`. The first failure fails the whole batch.
pub async fn resolve_descriptors<P>(provider: &P, asset_ids: &[&str]) -> Result<Vec<AssetDescriptor>, SummaryError>
where
    P: AssetProvider + ?Sized,
{
    debug!("Resolving {} asset descriptors", asset_ids.len());

    let calls = asset_ids.iter().map(|asset_id| async move {
        provider
            .asset_description(asset_id)
            .await
            .map_err(|e| SummaryError::AssetLookup {
                asset_id: asset_id.to_string(),
                source: Box::new(e),
            })
    });

    try_join_all(calls).await
}


#[cfg(test)]
mod tests {
    use super::testing::StaticAssets;
    use super::*;

    #[tokio::test]
    async fn resolves_in_request_order() {
        let assets = StaticAssets::with(&[("A", 9), ("B", 0)]);
        let descs = resolve_descriptors(&assets, &["B", "A"]).await.unwrap();

        assert_eq!(descs[0].asset_id, "B");
        assert_eq!(descs[1].asset_id, "A");
        assert_eq!(assets.call_count(), 2);
    }

    #[tokio::test]
    async fn one_failure_fails_the_batch() {
        let assets = StaticAssets::with(&[("A", 9), ("B", 0)]).failing_on("B");
        let err = resolve_descriptors(&assets, &["A", "B"]).await.unwrap_err();

        match err {
            SummaryError::AssetLookup { asset_id, .. } => assert_eq!(asset_id, "B"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
