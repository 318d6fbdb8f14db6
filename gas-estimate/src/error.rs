use alloy_primitives::I256;
use thiserror::Error;

use crate::Tier;

/// Errors raised while normalizing fee history or aggregating tiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    /// A fee history array holds fewer entries than the requested window.
    #[error("fee history field `{field}` has {available} entries but the window requires {required}")]
    ShortFeeHistory {
        field: &'static str,
        required: u64,
        available: usize,
    },

    /// A reward row holds fewer percentiles than there are tiers.
    #[error("reward row for block {block} has {available} entries, expected {expected}")]
    ShortRewardRow {
        block: I256,
        available: usize,
        expected: usize,
    },

    /// No records to average over.
    #[error("cannot average priority fees over an empty record set")]
    EmptyRecords,

    /// The running priority fee sum no longer fits in 256 bits.
    #[error("priority fee sum overflowed for the {0} tier")]
    Overflow(Tier),
}

/// Type alias for Results in this library.
pub type Result<T> = std::result::Result<T, ComputeError>;

impl ComputeError {
    /// Creates a ShortFeeHistory error.
    pub fn short_fee_history(field: &'static str, required: u64, available: usize) -> Self {
        Self::ShortFeeHistory {
            field,
            required,
            available,
        }
    }
}
