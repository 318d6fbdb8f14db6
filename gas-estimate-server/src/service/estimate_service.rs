use gas_estimate::{ComputeError, TierEstimates, PERCENTILES};
use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;
use tracing::{debug, info};

use crate::provider::{EthRpc, Provider, RpcError};

/// Provider call that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStage {
    Connect,
    LatestBlock,
    FeeHistory,
}

impl ProviderStage {
    pub fn title(self) -> &'static str {
        match self {
            ProviderStage::Connect => "Provider connection failed",
            ProviderStage::LatestBlock | ProviderStage::FeeHistory => "Provider query failed",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ProviderStage::Connect => "Failed to connect to provider.",
            ProviderStage::LatestBlock => "Failed to obtain latest block.",
            ProviderStage::FeeHistory => "Failed to obtain fee history.",
        }
    }
}

impl fmt::Display for ProviderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderStage::Connect => "connecting to provider",
            ProviderStage::LatestBlock => "fetching latest block",
            ProviderStage::FeeHistory => "fetching fee history",
        })
    }
}

/// Invalid block scan window setting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("not an unsigned integer: {0}")]
    NotANumber(#[from] ParseIntError),

    #[error("must be at least one block")]
    Zero,
}

/// Estimate failures, one variant per error kind reported to clients
#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("{stage} failed: {source}")]
    Provider {
        stage: ProviderStage,
        #[source]
        source: RpcError,
    },

    #[error("invalid block scan window {value:?}: {source}")]
    Configuration {
        value: String,
        #[source]
        source: WindowError,
    },

    #[error("fee computation failed: {0}")]
    Computation(#[from] ComputeError),
}

impl EstimateError {
    fn provider(stage: ProviderStage) -> impl FnOnce(RpcError) -> Self {
        move |source| Self::Provider { stage, source }
    }

    /// Error type name exposed to clients
    pub fn kind(&self) -> &'static str {
        match self {
            EstimateError::Provider { .. } => "ProviderError",
            EstimateError::Configuration { .. } => "ConfigurationError",
            EstimateError::Computation(_) => "ComputationError",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EstimateError::Provider { stage, .. } => stage.title(),
            EstimateError::Configuration { .. } => "Configuration error",
            EstimateError::Computation(_) => "Computation error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            EstimateError::Provider { stage, .. } => stage.message().to_string(),
            EstimateError::Configuration { .. } => "Failed to parse block scan window.".to_string(),
            EstimateError::Computation(err) => format!("Failed to compute fee estimates: {err}."),
        }
    }
}

/// Parses the block scan window setting into a positive block count
pub fn parse_block_window(value: &str) -> Result<u64, WindowError> {
    match value.parse::<u64>()? {
        0 => Err(WindowError::Zero),
        blocks => Ok(blocks),
    }
}

/// Computes priority fee tiers from the provider's recent fee history
///
/// Every call opens its own provider client and runs the chain
/// latest block, window parse, fee history, normalize, aggregate. Nothing is
/// cached between calls and nothing is retried.
pub struct EstimateService {
    provider: Provider,
    block_scan: String,
}

impl EstimateService {
    /// Creates a new estimate service
    pub fn new(provider: Provider, block_scan: impl Into<String>) -> Self {
        Self {
            provider,
            block_scan: block_scan.into(),
        }
    }

    /// Runs one estimate against the provider
    pub async fn estimate(&self) -> Result<TierEstimates, EstimateError> {
        let client = self
            .provider
            .connect()
            .map_err(EstimateError::provider(ProviderStage::Connect))?;

        let latest_block = client
            .latest_block_number()
            .await
            .map_err(EstimateError::provider(ProviderStage::LatestBlock))?;

        // Parsed per request so a bad setting is reported after the header fetch
        let blocks = parse_block_window(&self.block_scan).map_err(|source| {
            EstimateError::Configuration {
                value: self.block_scan.clone(),
                source,
            }
        })?;

        debug!(
            "Requesting fee history for {} blocks ending at block {}",
            blocks, latest_block
        );

        let history = client
            .fee_history(blocks, latest_block, &PERCENTILES)
            .await
            .map_err(EstimateError::provider(ProviderStage::FeeHistory))?;

        let estimates = TierEstimates::from_fee_history(&history, blocks)?;

        info!("Gas estimate at block {}: {}", latest_block, estimates);
        Ok(estimates)
    }
}

#[cfg(test)]
#[path = "estimate_service_tests.rs"]
mod tests;
