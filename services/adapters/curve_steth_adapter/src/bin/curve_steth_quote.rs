//! Curve stETH Quote CLI
//!
//! Runs a single adapter query against a live Ethereum node and prints
//! the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use curve_steth_adapter::{BridgeAsset, CurveStethAdapter, CurveStethConfig};
use std::path::PathBuf;
use tracing::info;
use web3::transports::Http;
use web3::types::U256;
use web3::Web3;

#[derive(Parser, Debug)]
#[command(name = "curve_steth_quote", about = "Query Curve stETH pricing and Lido yield")]
struct Args {
    /// TOML config file (CURVE_STETH_* environment variables override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the RPC endpoint
    #[arg(long)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    query: Query,
}

#[derive(Subcommand, Debug)]
enum Query {
    /// Annualized stETH yield from the last Lido report
    Apr,
    /// Quote ETH -> wstETH for an amount in wei
    Buy { amount: String },
    /// Quote wstETH -> ETH for an amount in wei
    Sell { amount: String },
    /// Total pooled ether after the last Lido report
    MarketSize,
    /// stETH backing an amount of wstETH in wei
    Underlying { amount: String },
    /// Auxiliary data layout and the encoding for both directions
    AuxData,
}

fn parse_wei(amount: &str) -> Result<U256> {
    U256::from_dec_str(amount).with_context(|| format!("Invalid wei amount: {}", amount))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("curve_steth_adapter=debug".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = CurveStethConfig::load(args.config.as_deref())?;
    if let Some(rpc_url) = args.rpc_url {
        config.rpc_url = rpc_url;
    }

    let transport = Http::new(&config.rpc_url)
        .with_context(|| format!("Failed to create HTTP transport for {}", config.rpc_url))?;
    let web3 = Web3::new(transport);
    let adapter =
        CurveStethAdapter::connect(config.bridge_address_id, &web3, &config.addresses()?)?;

    let eth = BridgeAsset::eth(0);
    let wsteth = BridgeAsset::erc20(1, adapter.wsteth_address());
    let unused = BridgeAsset::not_used();

    info!("Running {:?} against {}", args.query, config.rpc_url);

    match args.query {
        Query::Apr => {
            let apr = adapter.get_apr(&wsteth).await?;
            println!("stETH APR: {:.2}%", apr);
        }
        Query::Buy { amount } => {
            let input = parse_wei(&amount)?;
            let aux = adapter.get_aux_data(&eth, &unused, &wsteth, &unused).await?;
            let out = adapter
                .get_expected_output(&eth, &unused, &wsteth, &unused, aux[0], input)
                .await?;
            println!("{} wei ETH -> {} wei wstETH", input, out[0]);
        }
        Query::Sell { amount } => {
            let input = parse_wei(&amount)?;
            let aux = adapter.get_aux_data(&wsteth, &unused, &eth, &unused).await?;
            let out = adapter
                .get_expected_output(&wsteth, &unused, &eth, &unused, aux[0], input)
                .await?;
            println!("{} wei wstETH -> {} wei ETH", input, out[0]);
        }
        Query::MarketSize => {
            for value in adapter.get_market_size(&eth, &unused, &wsteth, &unused, 0).await? {
                println!("asset {}: {} wei pooled", value.asset_id, value.value);
            }
        }
        Query::Underlying { amount } => {
            let underlying = adapter.get_underlying_amount(&wsteth, parse_wei(&amount)?).await?;
            println!(
                "{} {} ({} decimals) at 0x{}",
                underlying.amount,
                underlying.symbol,
                underlying.decimals,
                hex::encode(underlying.address),
            );
        }
        Query::AuxData => {
            for slot in adapter.aux_data_config() {
                println!(
                    "bits {}..{} {:?}: {}",
                    slot.start,
                    slot.start + slot.length,
                    slot.solidity_type,
                    slot.description
                );
            }
            println!("buy: {:?}", adapter.get_aux_data(&eth, &unused, &wsteth, &unused).await?);
            println!("sell: {:?}", adapter.get_aux_data(&wsteth, &unused, &eth, &unused).await?);
        }
    }

    Ok(())
}
