use gas_estimate::{RawFeeHistory, U256};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::RpcError;

/// Most blocks a synthetic history will cover, matching common node limits
pub const MAX_FEE_HISTORY_BLOCKS: u64 = 1024;

/// Parameters of a recorded `fee_history` call
#[derive(Debug, Clone, PartialEq)]
pub struct FeeHistoryRequest {
    pub block_count: u64,
    pub newest_block: U256,
    pub percentiles: Vec<f64>,
}

/// Mock Ethereum client for tests and local runs
///
/// Clones share their call counters, so a clone handed to the service can be
/// inspected from the test that created it.
#[derive(Clone)]
pub struct MockEthClient {
    refuse_connection: bool,
    latest_block: Option<U256>,
    fee_history: Option<RawFeeHistory>,
    fail_fee_history: bool,
    latest_block_calls: Arc<AtomicUsize>,
    fee_history_requests: Arc<Mutex<Vec<FeeHistoryRequest>>>,
}

impl Default for MockEthClient {
    fn default() -> Self {
        Self {
            refuse_connection: false,
            latest_block: Some(U256::from(19_000_000u64)),
            fee_history: None,
            fail_fee_history: false,
            latest_block_calls: Arc::new(AtomicUsize::new(0)),
            fee_history_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockEthClient {
    /// Creates a mock that serves a synthetic history sized to each request
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `history` verbatim for every fee history call
    pub fn with_fee_history(mut self, history: RawFeeHistory) -> Self {
        self.fee_history = Some(history);
        self
    }

    pub fn with_latest_block(mut self, number: U256) -> Self {
        self.latest_block = Some(number);
        self
    }

    /// Makes `latest_block_number` fail
    pub fn without_latest_block(mut self) -> Self {
        self.latest_block = None;
        self
    }

    /// Makes `fee_history` fail
    pub fn failing_fee_history(mut self) -> Self {
        self.fail_fee_history = true;
        self
    }

    /// Makes `connect` fail
    pub fn refusing_connections(mut self) -> Self {
        self.refuse_connection = true;
        self
    }

    pub fn connect(&self) -> Result<Self, RpcError> {
        if self.refuse_connection {
            return Err(RpcError::InvalidUrl("mock://refused".to_string()));
        }
        Ok(self.clone())
    }

    pub async fn latest_block_number(&self) -> Result<U256, RpcError> {
        self.latest_block_calls.fetch_add(1, Ordering::SeqCst);
        self.latest_block.ok_or(RpcError::InvalidResponse)
    }

    pub async fn fee_history(
        &self,
        block_count: u64,
        newest_block: U256,
        percentiles: &[f64],
    ) -> Result<RawFeeHistory, RpcError> {
        self.fee_history_requests.lock().await.push(FeeHistoryRequest {
            block_count,
            newest_block,
            percentiles: percentiles.to_vec(),
        });

        if self.fail_fee_history {
            return Err(RpcError::RpcError {
                code: -32000,
                message: "mock fee history failure".to_string(),
            });
        }

        Ok(self
            .fee_history
            .clone()
            .unwrap_or_else(|| synthetic_fee_history(block_count, newest_block)))
    }

    pub fn latest_block_calls(&self) -> usize {
        self.latest_block_calls.load(Ordering::SeqCst)
    }

    pub async fn fee_history_requests(&self) -> Vec<FeeHistoryRequest> {
        self.fee_history_requests.lock().await.clone()
    }
}

/// Flat 30 gwei base fee with 1, 1.5 and 2 gwei tips
///
/// Like a node, answers with at most [`MAX_FEE_HISTORY_BLOCKS`] blocks.
fn synthetic_fee_history(block_count: u64, newest_block: U256) -> RawFeeHistory {
    let block_count = block_count.min(MAX_FEE_HISTORY_BLOCKS);
    let blocks = block_count as usize;
    let tips = vec![
        U256::from(1_000_000_000u64),
        U256::from(1_500_000_000u64),
        U256::from(2_000_000_000u64),
    ];

    RawFeeHistory {
        oldest_block: newest_block.saturating_sub(U256::from(block_count.saturating_sub(1))),
        base_fee_per_gas: vec![U256::from(30_000_000_000u64); blocks + 1],
        gas_used_ratio: vec![0.5; blocks],
        reward: vec![tips; blocks],
    }
}
