use async_trait::async_trait;
use gas_estimate::{RawFeeHistory, U256};

use super::{EthRpcClient, EthRpcConfig, MockEthClient, RpcError};

/// Trait for the Ethereum RPC operations the estimator relies on
#[async_trait]
pub trait EthRpc: Send + Sync {
    /// Number of the latest block header
    async fn latest_block_number(&self) -> Result<U256, RpcError>;

    /// Fee history for `block_count` blocks ending at `newest_block`
    async fn fee_history(
        &self,
        block_count: u64,
        newest_block: U256,
        percentiles: &[f64],
    ) -> Result<RawFeeHistory, RpcError>;
}

/// Wrapper enum for real or mock client
pub enum EthClient {
    Real(EthRpcClient),
    Mock(MockEthClient),
}

#[async_trait]
impl EthRpc for EthClient {
    async fn latest_block_number(&self) -> Result<U256, RpcError> {
        match self {
            EthClient::Real(client) => client.latest_block_number().await,
            EthClient::Mock(client) => client.latest_block_number().await,
        }
    }

    async fn fee_history(
        &self,
        block_count: u64,
        newest_block: U256,
        percentiles: &[f64],
    ) -> Result<RawFeeHistory, RpcError> {
        match self {
            EthClient::Real(client) => {
                client
                    .fee_history(block_count, newest_block, percentiles)
                    .await
            }
            EthClient::Mock(client) => {
                client
                    .fee_history(block_count, newest_block, percentiles)
                    .await
            }
        }
    }
}

/// Where clients come from: a JSON-RPC endpoint or a shared mock
#[derive(Clone)]
pub enum Provider {
    Rpc(EthRpcConfig),
    Mock(MockEthClient),
}

impl Provider {
    /// Opens a fresh client, one per estimate request
    pub fn connect(&self) -> Result<EthClient, RpcError> {
        match self {
            Provider::Rpc(config) => EthRpcClient::connect(config).map(EthClient::Real),
            Provider::Mock(mock) => mock.connect().map(EthClient::Mock),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Provider::Rpc(config) => config.url.clone(),
            Provider::Mock(_) => "mock provider".to_string(),
        }
    }
}
