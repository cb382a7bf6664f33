// src/aggregator.rs
use std::collections::HashSet;

use tracing::debug;

use crate::amount::Amount;
use crate::classifier::{asset_outputs, output_asset_ids, outputs_of_kind, owned_outputs};
use crate::error::SummaryError;
use crate::models::{AssetOwners, AssetTotals, NftBalance, Output, OutputKind};

/// Sum of the amounts of `outputs`, all assumed to share one asset
pub fn output_totals<'a, I>(outputs: I, asset_id: &str) -> Result<Amount, SummaryError>
where
    I: IntoIterator<Item = &'a Output>,
{
    outputs.into_iter().try_fold(Amount::ZERO, |acc, output| {
        acc.checked_add(output.amount)
            .ok_or_else(|| SummaryError::Overflow(asset_id.to_string()))
    })
}

/// Totals per asset of the fungible outputs owned by the wallet.
///
/// Assets the wallet owns nothing of are absent, not zero.
pub fn owned_tokens<'a, I>(outputs: I, owners: &HashSet<String>) -> Result<AssetTotals, SummaryError>
where
    I: IntoIterator<Item = &'a Output>,
{
    let token_outputs = outputs_of_kind(outputs, OutputKind::FungibleTransfer);
    let mine = owned_outputs(token_outputs, owners);

    let mut totals = AssetTotals::default();
    for asset_id in output_asset_ids(mine.iter().copied()) {
        let total = output_totals(asset_outputs(mine.iter().copied(), asset_id), asset_id)?;
        totals.insert(asset_id, total);
    }

    debug!("Aggregated {} owned assets", totals.len());
    Ok(totals)
}

/// Union of owner addresses per asset. Used for display attribution only.
pub fn output_asset_owners<'a, I>(outputs: I) -> AssetOwners
where
    I: IntoIterator<Item = &'a Output>,
{
    let mut owners = AssetOwners::new();
    for output in outputs {
        owners
            .entry(output.asset_id.clone())
            .or_default()
            .extend(output.addresses.iter().cloned());
    }
    owners
}

/// NFT groups of `asset_id` held by each wallet address.
///
/// Only wallet addresses holding at least one group appear, so an asset the
/// wallet holds nothing of yields an empty map.
pub fn nft_balance<'a, I>(outputs: I, owners: &HashSet<String>, asset_id: &str) -> NftBalance
where
    I: IntoIterator<Item = &'a Output>,
{
    let mut balance = NftBalance::new();
    for output in asset_outputs(outputs, asset_id) {
        for addr in output.addresses.iter().filter(|addr| owners.contains(*addr)) {
            balance
                .entry(addr.clone())
                .or_default()
                .insert(output.group_id);
        }
    }
    balance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(asset: &str, amount: u64, addrs: &[&str]) -> Output {
        Output {
            asset_id: asset.to_string(),
            kind: OutputKind::FungibleTransfer,
            amount: Amount::from_u64(amount),
            group_id: 0,
            addresses: addrs.iter().map(|a| a.to_string()).collect(),
            threshold: 1,
        }
    }

    fn nft(asset: &str, group_id: u32, addrs: &[&str]) -> Output {
        Output {
            asset_id: asset.to_string(),
            kind: OutputKind::NftTransfer,
            amount: Amount::ZERO,
            group_id,
            addresses: addrs.iter().map(|a| a.to_string()).collect(),
            threshold: 1,
        }
    }

    fn wallet(addrs: &[&str]) -> HashSet<String> {
        addrs.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn sums_owned_fungible_outputs_per_asset() {
        let outs = vec![
            token("B", 5, &["me"]),
            token("A", 40, &["me"]),
            token("A", 60, &["x"]),
            token("A", 2, &["me2"]),
            nft("C", 1, &["me"]),
        ];
        let totals = owned_tokens(&outs, &wallet(&["me", "me2"])).unwrap();

        assert_eq!(totals.asset_ids().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(totals.get("A"), Some(Amount::from_u64(42)));
        assert_eq!(totals.get("B"), Some(Amount::from_u64(5)));
        assert_eq!(totals.get("C"), None);
    }

    #[test]
    fn no_owned_outputs_means_no_entries() {
        let outs = vec![token("A", 10, &["x"])];
        assert!(owned_tokens(&outs, &wallet(&["me"])).unwrap().is_empty());
    }

    #[test]
    fn totals_exceed_u64_without_loss() {
        let outs = vec![token("A", u64::MAX, &["me"]), token("A", u64::MAX, &["me"])];
        let totals = owned_tokens(&outs, &wallet(&["me"])).unwrap();
        assert_eq!(
            totals.get("A"),
            Some(Amount::parse("36893488147419103230").unwrap())
        );
    }

    #[test]
    fn asset_owners_union_addresses() {
        let outs = vec![
            token("A", 1, &["x", "y"]),
            token("A", 1, &["y", "z"]),
            token("B", 1, &["w"]),
        ];
        let owners = output_asset_owners(&outs);
        assert_eq!(owners["A"].iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert_eq!(owners["B"].len(), 1);
        assert!(owners.get("C").is_none());
    }

    #[test]
    fn nft_balance_groups_per_wallet_address() {
        let outs = vec![
            nft("B", 1, &["me"]),
            nft("B", 2, &["me"]),
            nft("B", 2, &["me"]),
            nft("B", 3, &["x"]),
            nft("D", 9, &["me"]),
        ];
        let balance = nft_balance(&outs, &wallet(&["me", "unused"]), "B");

        assert_eq!(balance.len(), 1);
        assert_eq!(balance["me"].iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert!(nft_balance(&outs, &wallet(&["me"]), "E").is_empty());
    }

    #[test]
    fn sum_overflow_is_an_error() {
        let max = Amount::parse(
            "57896044618658097711785492504343953926634992332820282019728792003956564819967",
        )
        .unwrap();
        let mut big = token("A", 0, &["me"]);
        big.amount = max;
        let outs = vec![big.clone(), big];

        let err = owned_tokens(&outs, &wallet(&["me"])).unwrap_err();
        assert!(matches!(err, SummaryError::Overflow(ref id) if id == "A"));
    }
}
