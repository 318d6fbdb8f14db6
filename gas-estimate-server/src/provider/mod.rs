//! Ethereum JSON-RPC provider module for fetching fee history

mod mock_client;
mod rpc_client;
mod traits;

pub use mock_client::{FeeHistoryRequest, MockEthClient};
pub use rpc_client::{EthRpcClient, EthRpcConfig, RpcError};
pub use traits::{EthClient, EthRpc, Provider};
