//! `ship-rates` server binary.

use anyhow::Context;
use clap::Parser;
use ship_rates::api::rest::{AppState, create_router};
use ship_rates::application::services::QuoteAggregationEngine;
use ship_rates::infrastructure::carriers::StaticAdapterRegistry;
use ship_rates::settings::AppConfig;
use ship_rates::telemetry;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ship-rates")]
#[command(about = "Ranks shipping quotes from many carriers", version)]
struct Args {
    /// Configuration file; `ship-rates.toml` is used if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Validate configuration and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let mut config =
        AppConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    telemetry::init_tracing(args.json_logs || config.log.json);
    for warning in config.warnings() {
        tracing::warn!("{}", warning);
    }

    if args.check {
        tracing::info!(
            carriers = config.aggregation.carriers.len(),
            top_k = config.aggregation.top_k,
            "configuration is valid"
        );
        return Ok(());
    }

    let registry = StaticAdapterRegistry::envia(&config.aggregation.carriers, &config.envia)
        .context("failed to build carrier adapters")?;
    let adapters = registry.len();
    let engine = QuoteAggregationEngine::new(
        Arc::new(registry),
        Arc::from(config.ranking.strategy()),
        Arc::new(config.region_table()?),
        config.aggregation.clone(),
    );

    let state = AppState::new(Arc::new(engine), config.origin.clone(), config.default_package.clone());
    let router = create_router(state);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    tracing::info!(
        %address,
        adapters,
        base_url = config.envia.base_url(),
        "ship-rates listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("ship-rates stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
