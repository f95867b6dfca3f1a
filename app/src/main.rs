//! nation3 — serves the veNATION lock calculator over HTTP.
//!
//! Usage:
//!   nation3 [--config <path>] [--host <ip>] [--port <port>] [--chain <mainnet|goerli>]

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use nation_core::{AppConfig, Chain, ContractConfig};

#[derive(Parser, Debug)]
#[command(
    name = "nation3",
    version,
    about = "Nation3 lock page backend: lock state, windows and veNATION estimates"
)]
struct Args {
    /// Path to a JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// API listen address (overrides the config file).
    #[arg(long)]
    host: Option<IpAddr>,

    /// API listen port (overrides the config file).
    #[arg(long)]
    port: Option<u16>,

    /// Chain to use the built-in contract addresses of (overrides the config file).
    #[arg(long)]
    chain: Option<Chain>,
}

fn load_config(args: &Args) -> anyhow::Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };

    if let Some(chain) = args.chain {
        let Some(contracts) = ContractConfig::for_chain(chain) else {
            bail!("no built-in contracts for {}; pass them with --config", chain);
        };
        config.chain = chain;
        config.contracts = contracts;
    }
    if let Some(host) = args.host {
        config.api_host = host;
    }
    if let Some(port) = args.port {
        config.api_port = port;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nation3_lib::init_tracing();

    let args = Args::parse();
    let config = load_config(&args)?;

    nation3_lib::run(config).await
}
