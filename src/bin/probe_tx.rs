use reqwest::Client;
use serde::Deserialize;
use std::env;

// Dumps the raw explorer shape of one transaction, handy when the wire
// format drifts.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    #[serde(rename = "assetID")]
    asset_id: String,
    output_type: u32,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    addresses: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Input {
    output: Output,
}

#[derive(Debug, Deserialize)]
struct Tx {
    id: String,
    #[serde(default)]
    inputs: Option<Vec<Input>>,
    #[serde(default)]
    outputs: Option<Vec<Output>>,
}

const DEFAULT_EXPLORER: &str = "https://explorerapi.avax.network";

fn print_output(side: &str, o: &Output) {
    println!(
        "{} | asset: {} | type: {} | amount: {} | owners: {:?}",
        side,
        o.asset_id,
        o.output_type,
        o.amount.as_deref().unwrap_or("-"),
        o.addresses.as_deref().unwrap_or(&[])
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let tx_id = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: probe_tx <tx-id> [explorer-url]"))?;
    let explorer = env::args().nth(2).unwrap_or_else(|| DEFAULT_EXPLORER.to_string());

    let client = Client::new();
    let url = format!("{}/v2/transactions/{}", explorer.trim_end_matches('/'), tx_id);
    println!("Fetching {}", url);

    let raw: serde_json::Value = client.get(&url).send().await?.json().await?;
    println!("Raw = {:#}", raw);

    let tx: Tx = serde_json::from_value(raw)?;
    println!("Tx: {}", tx.id);
    for input in tx.inputs.iter().flatten() {
        print_output("IN ", &input.output);
    }
    for output in tx.outputs.iter().flatten() {
        print_output("OUT", output);
    }

    Ok(())
}
