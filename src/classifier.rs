// src/classifier.rs
use std::collections::HashSet;

use crate::models::{Output, OutputKind};

/// An output is owned when any of its owner addresses belongs to the wallet.
/// Threshold is irrelevant here, presence of one address is enough.
pub fn is_owned(output: &Output, owners: &HashSet<String>) -> bool {
    output.addresses.iter().any(|addr| owners.contains(addr))
}

/// Split outputs into (owned, not owned). Every output lands in exactly one side.
pub fn partition_by_owner<'a, I>(outputs: I, owners: &HashSet<String>) -> (Vec<&'a Output>, Vec<&'a Output>)
where
    I: IntoIterator<Item = &'a Output>,
{
    outputs.into_iter().partition(|output| is_owned(output, owners))
}

pub fn owned_outputs<'a, I>(outputs: I, owners: &HashSet<String>) -> Vec<&'a Output>
where
    I: IntoIterator<Item = &'a Output>,
{
    partition_by_owner(outputs, owners).0
}

pub fn not_owned_outputs<'a, I>(outputs: I, owners: &HashSet<String>) -> Vec<&'a Output>
where
    I: IntoIterator<Item = &'a Output>,
{
    partition_by_owner(outputs, owners).1
}

pub fn outputs_of_kind<'a, I>(outputs: I, kind: OutputKind) -> Vec<&'a Output>
where
    I: IntoIterator<Item = &'a Output>,
{
    outputs.into_iter().filter(|output| output.kind == kind).collect()
}

pub fn asset_outputs<'a, I>(outputs: I, asset_id: &str) -> Vec<&'a Output>
where
    I: IntoIterator<Item = &'a Output>,
{
    outputs
        .into_iter()
        .filter(|output| output.asset_id == asset_id)
        .collect()
}

/// Distinct asset ids in first-seen order
pub fn output_asset_ids<'a, I>(outputs: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Output>,
{
    let mut seen = HashSet::new();
    outputs
        .into_iter()
        .map(|output| output.asset_id.as_str())
        .filter(|id| seen.insert(*id))
        .collect()
}
