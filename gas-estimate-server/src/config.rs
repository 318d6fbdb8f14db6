use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Legacy variable naming the provider URL
pub const PROVIDER_URL_VAR: &str = "MUMBAI_HTTP_PROVIDER";

/// Legacy variable naming the block scan window
pub const BLOCK_SCAN_VAR: &str = "ESTIMATE_BLOCK_SCAN";

/// Application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub estimate: EstimateConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Host to bind to (default: 0.0.0.0)
    pub host: String,
    /// Port to listen on (default: 1323)
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 1323,
        }
    }
}

/// Ethereum JSON-RPC provider configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    /// HTTP JSON-RPC endpoint (default: http://localhost:8545)
    pub url: String,
    /// Per-request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8545".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Fee estimation configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EstimateConfig {
    /// Number of recent blocks to average over (default: "10")
    ///
    /// Kept as text and validated on each estimate.
    pub block_scan: String,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            block_scan: "10".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        // Load from config file if specified via environment variable
        if let Ok(config_file) = std::env::var("GAS_ESTIMATE_CONFIG_FILE") {
            builder = builder.add_source(File::from(Path::new(&config_file)));
        } else {
            // Try to load default config files
            builder = builder
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name("config").required(false));
        }

        Self::with_environment(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?.add_source(File::from(path.as_ref()));

        // Still allow environment overrides
        Self::with_environment(builder)?.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 1323)?
            .set_default("provider.url", "http://localhost:8545")?
            .set_default("provider.timeout_secs", 30)?
            .set_default("estimate.block_scan", "10")
    }

    fn with_environment(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            // GAS_ESTIMATE_ prefix, sections split on a double underscore
            .add_source(
                Environment::with_prefix("GAS_ESTIMATE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Variables of the original deployment take precedence
            .set_override_option("provider.url", std::env::var(PROVIDER_URL_VAR).ok())?
            .set_override_option("estimate.block_scan", std::env::var(BLOCK_SCAN_VAR).ok())
    }

    /// Convert to the provider config for the RPC client
    pub fn to_provider_config(&self) -> crate::provider::EthRpcConfig {
        crate::provider::EthRpcConfig {
            url: self.provider.url.clone(),
            timeout: Duration::from_secs(self.provider.timeout_secs),
        }
    }
}
