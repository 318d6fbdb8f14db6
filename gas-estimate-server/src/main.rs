use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gas_estimate_server::{
    cli::Cli,
    config::AppConfig,
    provider::{MockEthClient, Provider},
    server::{create_app, run_server},
    service::EstimateService,
};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(cli.log_filter()).context("Invalid log filter")?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    info!("Gas Estimate Server starting...");

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;
    cli.apply(&mut config);

    let provider = if cli.mock_provider {
        warn!("Using mock provider, estimates are synthetic");
        Provider::Mock(MockEthClient::new())
    } else {
        Provider::Rpc(config.to_provider_config())
    };

    info!("Configuration loaded:");
    info!("  Server: {}:{}", config.server.host, config.server.port);
    info!("  Provider: {}", provider.describe());
    info!("  Provider timeout: {}s", config.provider.timeout_secs);
    info!("  Block scan window: {}", config.estimate.block_scan);

    // Requests connect on their own; this only surfaces a bad URL early
    if let Err(e) = provider.connect() {
        warn!("Provider endpoint looks unusable: {}", e);
    }

    let service = Arc::new(EstimateService::new(
        provider,
        config.estimate.block_scan.clone(),
    ));

    // Create and run HTTP server
    let app = create_app(service);

    run_server(app, &config.server.host, config.server.port)
        .await
        .context("Failed to run HTTP server")?;

    info!("Gas Estimate Server shut down");

    Ok(())
}
