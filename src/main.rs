use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::{Error, Result};
use log::info;

use swapquote::api::{self, validate_quote_request, AppState};
use swapquote::chain::{AlloyChainReader, ChainReader};
use swapquote::config::Config;
use swapquote::gas::{GasPriceCache, GasPriceRefresher};
use swapquote::quote::QuoteEngine;
use swapquote::utils::logger::setup_logger;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API with the background gas price refresher (default)
    Serve,
    /// Quote a single swap and exit
    Quote {
        /// Token sold
        from_token: String,
        /// Token bought
        to_token: String,
        /// Amount sold, in base units
        amount_in: String,
    },
    /// Read the gas price once and exit
    GasPrice,
}

/// Wires the core components against the configured node.
fn build_state(config: &Config) -> Result<AppState, Error> {
    let reader: Arc<dyn ChainReader> = Arc::new(AlloyChainReader::new(
        &config.node_url,
        config.factory_address,
    )?);
    Ok(AppState {
        quotes: QuoteEngine::new(Arc::clone(&reader)),
        gas: Arc::new(GasPriceCache::new(reader, config.gas.staleness_threshold)),
    })
}

async fn serve(config: &Config, state: AppState) -> Result<(), Error> {
    let addr = config.listen_addr()?;
    info!(
        "Server starting with NODE_URL: {}, factory: {:#x}",
        config.node_url, config.factory_address
    );

    let refresher =
        GasPriceRefresher::start(Arc::clone(&state.gas), config.gas.refresh_interval).await;

    let result = api::serve(addr, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for shutdown signal: {e}");
        }
        info!("Received shutdown signal, stopping...");
    })
    .await;

    refresher.shutdown().await;
    result
}

async fn quote(state: &AppState, from: &str, to: &str, amount_in: &str) -> Result<(), Error> {
    let request = validate_quote_request(from, to, amount_in)?;
    let amount_out = state
        .quotes
        .compute_output_amount(request.from_token, request.to_token, request.amount_in)
        .await?;
    println!("{amount_out}");
    Ok(())
}

async fn gas_price(state: &AppState) -> Result<(), Error> {
    match state.gas.read_gas_price().await {
        Some(price) => println!("{price}"),
        None => eyre::bail!("Gas price unavailable"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_logger().expect("Failed to set up logger");

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let state = build_state(&config)?;

    match cli.command {
        Some(Commands::Quote {
            from_token,
            to_token,
            amount_in,
        }) => quote(&state, &from_token, &to_token, &amount_in).await?,
        Some(Commands::GasPrice) => gas_price(&state).await?,
        Some(Commands::Serve) | None => serve(&config, state).await?,
    }

    Ok(())
}
