//! Command-line interface configuration

use clap::Parser;

use crate::config::AppConfig;

/// Default tracing filter when neither `--log-filter` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "gas_estimate_server=info,gas_estimate=info,tower_http=info";

/// Gas Estimate Server CLI
///
/// Flags override values from the configuration file and environment.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // Server options
    /// Host to bind the server to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    // Provider options
    /// Ethereum JSON-RPC endpoint URL
    #[arg(long)]
    pub provider_url: Option<String>,

    /// Provider request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    // Estimation settings
    /// Number of recent blocks to average priority fees over
    #[arg(short, long)]
    pub block_scan: Option<String>,

    // Test mode
    /// Serve estimates from an in-process mock provider
    #[arg(long)]
    pub mock_provider: bool,

    // Logging
    /// Log filter (e.g., "gas_estimate_server=debug,gas_estimate=info")
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,

    /// Path to configuration file (overridden by CLI args)
    #[arg(short, long)]
    pub config: Option<String>,
}

impl Cli {
    /// Applies the flags that were given on top of `config`
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.provider_url {
            config.provider.url = url.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.provider.timeout_secs = timeout_secs;
        }
        if let Some(block_scan) = &self.block_scan {
            config.estimate.block_scan = block_scan.clone();
        }
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
