//! Gas Estimate - priority fee tiers from Ethereum fee history
//!
//! This library turns the payload of an `eth_feeHistory` call into three
//! priority-fee recommendations (slow, average and fast), one per requested
//! reward percentile.
//!
//! All fee arithmetic is done on 256-bit unsigned integers. Averages use
//! truncating integer division and never pass through floating point.
//!
//! # Example
//! ```
//! use gas_estimate::{RawFeeHistory, TierEstimates, U256};
//!
//! let history = RawFeeHistory {
//!     oldest_block: U256::from(100),
//!     base_fee_per_gas: vec![U256::from(100), U256::from(200)],
//!     gas_used_ratio: vec![0.5, 0.5],
//!     reward: vec![
//!         vec![U256::from(1), U256::from(2), U256::from(3)],
//!         vec![U256::from(2), U256::from(4), U256::from(6)],
//!     ],
//! };
//!
//! let estimates = TierEstimates::from_fee_history(&history, 2).unwrap();
//! assert_eq!(estimates.slow, U256::from(1));
//! assert_eq!(estimates.average, U256::from(3));
//! assert_eq!(estimates.fast, U256::from(4));
//! ```

// Public modules
pub mod error;

// Data structures and algorithms
mod fee_history;
mod tier;

// Public exports
pub use alloy_primitives::U256;
pub use error::{ComputeError, Result};
pub use fee_history::{normalize, BlockFeeRecord, RawFeeHistory};
pub use tier::{average_priority_fee, Tier, TierEstimates, PERCENTILES, TIER_COUNT};
