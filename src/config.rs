use dotenvy::dotenv;
use eyre::Result;
use std::{collections::HashSet, env};
use tracing::{info, warn};

use crate::amount::Amount;
use crate::summary::FeeConfig;

/// Mainnet AVAX asset id
pub const DEFAULT_FEE_ASSET_ID: &str = "FvwEAhmxKfeiG8SnEvq42hc6whRyY3EFYAvebMqDNDGCgxN5Z";
/// 0.001 AVAX in nAVAX
pub const DEFAULT_TX_FEE: u64 = 1_000_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub explorer_url: String,
    pub owner_addresses: HashSet<String>,
    pub fee: FeeConfig,
    pub port: u16,
}

/// Comma separated addresses, trimmed, with any `X-` chain prefix removed.
pub fn parse_addresses(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.strip_prefix("X-").unwrap_or(s).to_string())
        .collect()
}

/// Configured fee, or the default when unset or unparseable
pub fn parse_tx_fee(raw: Option<&str>) -> Amount {
    match raw.map(Amount::parse) {
        Some(Ok(fee)) => fee,
        Some(Err(e)) => {
            warn!("Ignoring TX_FEE: {}", e);
            Amount::from_u64(DEFAULT_TX_FEE)
        }
        None => Amount::from_u64(DEFAULT_TX_FEE),
    }
}

pub fn load() -> Result<Config> {
    dotenv().ok();

    // Explorer API (default: public mainnet explorer)
    let explorer_url = env::var("EXPLORER_URL")
        .unwrap_or_else(|_| "https://explorerapi.avax.network".to_string())
        .trim_end_matches('/')
        .to_string();

    // Wallet addresses (default: empty set)
    let owner_addresses = parse_addresses(&env::var("OWNER_ADDRESSES").unwrap_or_default());
    if owner_addresses.is_empty() {
        warn!("OWNER_ADDRESSES is empty, summaries will show no changes");
    }

    let fee_asset_id = env::var("FEE_ASSET_ID")
        .or_else(|_| env::var("AVAX_ASSET_ID")) // alias support
        .unwrap_or_else(|_| DEFAULT_FEE_ASSET_ID.to_string());

    // Tx fee in raw units (default: 1000000)
    let tx_fee = parse_tx_fee(env::var("TX_FEE").ok().as_deref());

    // API port (default: 8080)
    let port = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let cfg = Config {
        explorer_url,
        owner_addresses,
        fee: FeeConfig {
            asset_id: fee_asset_id,
            tx_fee,
        },
        port,
    };

    info!("Loaded config: {:?}", cfg);

    Ok(cfg)
}
