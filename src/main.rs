mod aggregator;
mod amount;
mod api;
mod assets;
mod classifier;
mod config;
mod error;
mod models;
mod parser;
mod rpc;
mod summary;

use std::env;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // RUST_LOG wins, otherwise INFO
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stdout)
        .with_target(false)
        .init();

    let cfg = config::load()?;
    info!("  Explorer: {}", cfg.explorer_url);
    info!("  Wallet addresses: {}", cfg.owner_addresses.len());
    info!("  Fee: {} of {}", cfg.fee.tx_fee, cfg.fee.asset_id);

    let explorer = rpc::ExplorerClient::new(&cfg.explorer_url)?;

    // One-shot mode: summarize a single tx and exit
    if let Some(tx_id) = env::args().nth(1) {
        let tx = explorer.get_transaction(&tx_id).await?;
        let entry = summary::summarize(&tx, &cfg.owner_addresses, &cfg.fee, &explorer).await?;
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    info!("Base tx summary service starting...");

    let api_handle = tokio::spawn(api::serve(cfg, explorer));

    tokio::select! {
        res = api_handle => match res {
            Ok(Ok(_)) => info!("API exited cleanly"),
            Ok(Err(e)) => error!("API error: {:?}", e),
            Err(e) => error!("API task panicked: {:?}", e),
        },
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received, stopping...");
        }
    }

    info!("Base tx summary service stopped.");
    Ok(())
}
