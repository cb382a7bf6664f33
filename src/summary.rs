// src/summary.rs
use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info};

use crate::aggregator::{nft_balance, output_asset_owners, owned_tokens};
use crate::amount::Amount;
use crate::assets::{resolve_descriptors, AssetProvider};
use crate::classifier::{not_owned_outputs, outputs_of_kind};
use crate::error::SummaryError;
use crate::models::{
    AssetOwners, AssetTotals, BaseTxSummary, HistoryEntry, NftBalance, NftBalances, Output,
    OutputKind, TokenSummary, Transaction, BASE_TX_TYPE,
};
use crate::parser::parse_memo;

/// Network fee settings threaded into the summary engine
#[derive(Debug, Clone, PartialEq)]
pub struct FeeConfig {
    pub asset_id: String,
    pub tx_fee: Amount,
}

/// Net change per asset, in first-seen order over gains then losses.
///
/// Assets whose net is zero are skipped. A negative net is attributed to the
/// receivers (`tos`), anything else to the senders (`froms`).
pub async fn tokens_summary<P>(
    gains: &AssetTotals,
    losses: &AssetTotals,
    froms: &AssetOwners,
    tos: &AssetOwners,
    fee: &FeeConfig,
    assets: &P,
) -> Result<Vec<TokenSummary>, SummaryError>
where
    P: AssetProvider + ?Sized,
{
    let mut seen = HashSet::new();
    let asset_ids: Vec<&str> = gains
        .asset_ids()
        .chain(losses.asset_ids())
        .filter(|id| seen.insert(*id))
        .collect();

    let descriptors = resolve_descriptors(assets, &asset_ids).await?;

    let mut tokens = Vec::new();
    for (asset_id, asset) in asset_ids.into_iter().zip(descriptors) {
        let gain = gains.get(asset_id).unwrap_or(Amount::ZERO);
        let mut loss = losses.get(asset_id).unwrap_or(Amount::ZERO);

        // fee is paid out of the spent fee asset, it is not a transfer
        if asset_id == fee.asset_id && !loss.is_zero() {
            loss = loss
                .checked_sub(fee.tx_fee)
                .ok_or_else(|| SummaryError::Overflow(asset_id.to_string()))?;
        }

        let net = gain
            .checked_sub(loss)
            .ok_or_else(|| SummaryError::Overflow(asset_id.to_string()))?;
        if net.is_zero() {
            debug!("Asset {} unchanged, skipping", asset_id);
            continue;
        }

        let counterparties = if net.is_negative() { tos } else { froms };
        let addresses: BTreeSet<String> = counterparties.get(asset_id).cloned().unwrap_or_default();

        tokens.push(TokenSummary {
            asset_id: asset_id.to_string(),
            amount: net,
            amount_display_value: net.to_display(asset.denomination),
            addresses,
            asset,
        });
    }

    Ok(tokens)
}

pub async fn base_tx_summary<P>(
    tx: &Transaction,
    owners: &HashSet<String>,
    fee: &FeeConfig,
    assets: &P,
) -> Result<BaseTxSummary, SummaryError>
where
    P: AssetProvider + ?Sized,
{
    let losses = owned_tokens(tx.spent_outputs(), owners)?;
    let gains = owned_tokens(&tx.outputs, owners)?;
    if gains.is_empty() && losses.is_empty() {
        debug!("Tx {} moves no wallet tokens", tx.id);
    }

    let froms = output_asset_owners(not_owned_outputs(tx.spent_outputs(), owners));
    let tos = output_asset_owners(not_owned_outputs(&tx.outputs, owners));

    let tokens = tokens_summary(&gains, &losses, &froms, &tos, fee, assets).await?;

    info!("Summarized tx {} → {} token changes", tx.id, tokens.len());

    Ok(BaseTxSummary {
        id: tx.id.clone(),
        fee: fee.tx_fee,
        tx_type: BASE_TX_TYPE,
        timestamp: tx.timestamp,
        memo: parse_memo(&tx.memo),
        tokens,
    })
}

fn nft_balances<'a, I>(tx: &Transaction, outputs: I, owners: &HashSet<String>) -> NftBalances
where
    I: IntoIterator<Item = &'a Output>,
{
    let nft_outputs = outputs_of_kind(outputs, OutputKind::NftTransfer);

    let mut res = NftBalances::new();
    for asset_id in tx.input_totals.keys() {
        let balance = nft_balance(nft_outputs.iter().copied(), owners, asset_id);
        if balance.is_empty() {
            continue;
        }
        res.insert(asset_id.clone(), balance);
    }
    res
}

/// NFT groups the wallet holds among the transaction's new outputs
pub fn nft_gains(tx: &Transaction, owners: &HashSet<String>) -> NftBalances {
    nft_balances(tx, &tx.outputs, owners)
}

/// NFT groups the wallet held among the transaction's spent inputs
pub fn nft_losses(tx: &Transaction, owners: &HashSet<String>) -> NftBalances {
    nft_balances(tx, tx.spent_outputs(), owners)
}

// groups each owner has in `a` but not in `b`; owners left with nothing are dropped
fn groups_not_in(a: &NftBalance, b: &NftBalance) -> NftBalance {
    a.iter()
        .filter_map(|(owner, groups)| {
            let left: BTreeSet<u32> = match b.get(owner) {
                Some(other) => groups.difference(other).copied().collect(),
                None => groups.clone(),
            };
            (!left.is_empty()).then(|| (owner.clone(), left))
        })
        .collect()
}

/// Per-owner set difference of received and sent groups.
///
/// A group both spent and recreated for the same owner did not move, so it
/// is removed from both sides. Returns `(net_received, net_sent)`.
pub fn net_nft_changes(received: &NftBalances, sent: &NftBalances) -> (NftBalances, NftBalances) {
    let empty = NftBalance::new();
    let asset_ids: BTreeSet<&String> = received.keys().chain(sent.keys()).collect();

    let mut net_received = NftBalances::new();
    let mut net_sent = NftBalances::new();

    for asset_id in asset_ids {
        let recv = received.get(asset_id).unwrap_or(&empty);
        let spent = sent.get(asset_id).unwrap_or(&empty);

        let recv_net = groups_not_in(recv, spent);
        let sent_net = groups_not_in(spent, recv);
        if !recv_net.is_empty() {
            net_received.insert(asset_id.clone(), recv_net);
        }
        if !sent_net.is_empty() {
            net_sent.insert(asset_id.clone(), sent_net);
        }
    }

    (net_received, net_sent)
}

/// Full history entry: token summary plus net NFT movements
pub async fn summarize<P>(
    tx: &Transaction,
    owners: &HashSet<String>,
    fee: &FeeConfig,
    assets: &P,
) -> Result<HistoryEntry, SummaryError>
where
    P: AssetProvider + ?Sized,
{
    let summary = base_tx_summary(tx, owners, fee, assets).await?;
    let (nfts_received, nfts_sent) = net_nft_changes(&nft_gains(tx, owners), &nft_losses(tx, owners));

    Ok(HistoryEntry {
        summary,
        nfts_received,
        nfts_sent,
    })
}
