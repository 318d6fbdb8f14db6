use alloy_primitives::{I256, U256};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ComputeError, Result},
    tier::TIER_COUNT,
};

/// Fee history as returned by `eth_feeHistory`.
///
/// The arrays are aligned by index: entry `i` of `base_fee_per_gas`,
/// `gas_used_ratio` and `reward` describe the same block. Quantities are
/// carried as 256-bit integers and use the JSON-RPC hex encoding on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFeeHistory {
    /// Block number the walk starts from.
    pub oldest_block: U256,

    /// Base fee per gas, one entry per block (plus the next pending block).
    #[serde(default)]
    pub base_fee_per_gas: Vec<U256>,

    /// Ratio of gas used to gas limit, one entry per block.
    #[serde(default)]
    pub gas_used_ratio: Vec<f64>,

    /// Priority fees per gas at the requested percentiles, one row per block.
    #[serde(default)]
    pub reward: Vec<Vec<U256>>,
}

impl RawFeeHistory {
    /// Checks that every array can back a window of `window` blocks.
    fn ensure_covers(&self, window: u64) -> Result<()> {
        let lengths = [
            ("baseFeePerGas", self.base_fee_per_gas.len()),
            ("gasUsedRatio", self.gas_used_ratio.len()),
            ("reward", self.reward.len()),
        ];

        for (field, available) in lengths {
            if (available as u64) < window {
                return Err(ComputeError::short_fee_history(field, window, available));
            }
        }

        Ok(())
    }
}

/// Fee data for a single block, produced by [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct BlockFeeRecord {
    number: I256,
    base_fee_per_gas: U256,
    gas_used_ratio: f64,
    priority_fee_per_gas: [U256; TIER_COUNT],
}

impl BlockFeeRecord {
    /// Creates a record from already validated parts.
    pub fn new(
        number: I256,
        base_fee_per_gas: U256,
        gas_used_ratio: f64,
        priority_fee_per_gas: [U256; TIER_COUNT],
    ) -> Self {
        Self {
            number,
            base_fee_per_gas,
            gas_used_ratio,
            priority_fee_per_gas,
        }
    }

    /// Block label from the backward walk. Goes negative once the walk
    /// passes block zero.
    pub fn number(&self) -> I256 {
        self.number
    }

    pub fn base_fee_per_gas(&self) -> U256 {
        self.base_fee_per_gas
    }

    pub fn gas_used_ratio(&self) -> f64 {
        self.gas_used_ratio
    }

    /// Priority fees per gas ordered slow, average, fast.
    pub fn priority_fee_per_gas(&self) -> &[U256; TIER_COUNT] {
        &self.priority_fee_per_gas
    }
}

/// Converts a fee history payload into one record per block.
///
/// The walk starts at `oldest_block` with array index 0 and steps the block
/// number down by one for each following index, so the first record carries
/// `oldest_block` and the last carries `oldest_block - window + 1`. Labels
/// are signed and keep counting below zero on short chains; they never feed
/// into the fee averages.
///
/// Exactly `window` records are returned. Arrays shorter than the window or a
/// reward row with fewer than three percentiles are reported as errors
/// instead of being truncated.
pub fn normalize(history: &RawFeeHistory, window: u64) -> Result<Vec<BlockFeeRecord>> {
    history.ensure_covers(window)?;

    // ensure_covers bounds the window by an in-memory array length
    let mut records = Vec::with_capacity(window as usize);
    let mut number = I256::try_from(history.oldest_block).unwrap_or(I256::MAX);

    for index in 0..window as usize {
        let row = &history.reward[index];
        if row.len() < TIER_COUNT {
            return Err(ComputeError::ShortRewardRow {
                block: number,
                available: row.len(),
                expected: TIER_COUNT,
            });
        }

        records.push(BlockFeeRecord::new(
            number,
            history.base_fee_per_gas[index],
            history.gas_used_ratio[index],
            [row[0], row[1], row[2]],
        ));

        number = number.saturating_sub(I256::ONE);
    }

    Ok(records)
}
