use alloy_primitives::U256;
use std::fmt;

use crate::{
    error::{ComputeError, Result},
    fee_history::{normalize, BlockFeeRecord, RawFeeHistory},
};

/// Number of priority fee tiers.
pub const TIER_COUNT: usize = 3;

/// Reward percentiles requested from the provider, ordered slow, average, fast.
pub const PERCENTILES: [f64; TIER_COUNT] = [25.0, 50.0, 75.0];

/// A priority fee recommendation bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Slow,
    Average,
    Fast,
}

impl Tier {
    /// All tiers in reward column order.
    pub const ALL: [Tier; TIER_COUNT] = [Tier::Slow, Tier::Average, Tier::Fast];

    /// Column of this tier inside a reward row.
    pub const fn index(self) -> usize {
        match self {
            Tier::Slow => 0,
            Tier::Average => 1,
            Tier::Fast => 2,
        }
    }

    /// Reward percentile backing this tier.
    pub const fn percentile(self) -> f64 {
        PERCENTILES[self.index()]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Tier::Slow => "slow",
            Tier::Average => "average",
            Tier::Fast => "fast",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean priority fee per gas of one tier across `records`.
///
/// The result is `floor(sum / records.len())`. An empty slice is an error
/// rather than a division by zero, and a sum that does not fit in 256 bits is
/// reported instead of wrapping.
pub fn average_priority_fee(records: &[BlockFeeRecord], tier: Tier) -> Result<U256> {
    if records.is_empty() {
        return Err(ComputeError::EmptyRecords);
    }

    let total = records.iter().try_fold(U256::ZERO, |total, record| {
        total
            .checked_add(record.priority_fee_per_gas()[tier.index()])
            .ok_or(ComputeError::Overflow(tier))
    })?;

    Ok(total / U256::from(records.len()))
}

/// Priority fee recommendations for all three tiers, in wei per gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierEstimates {
    pub slow: U256,
    pub average: U256,
    pub fast: U256,
}

impl TierEstimates {
    /// Aggregates every tier over the same record set.
    pub fn from_records(records: &[BlockFeeRecord]) -> Result<Self> {
        Ok(Self {
            slow: average_priority_fee(records, Tier::Slow)?,
            average: average_priority_fee(records, Tier::Average)?,
            fast: average_priority_fee(records, Tier::Fast)?,
        })
    }

    /// Normalizes `history` over `window` blocks and aggregates the result.
    pub fn from_fee_history(history: &RawFeeHistory, window: u64) -> Result<Self> {
        let records = normalize(history, window)?;
        Self::from_records(&records)
    }

    pub fn get(&self, tier: Tier) -> U256 {
        match tier {
            Tier::Slow => self.slow,
            Tier::Average => self.average,
            Tier::Fast => self.fast,
        }
    }
}

impl fmt::Display for TierEstimates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slow={} average={} fast={}",
            self.slow, self.average, self.fast
        )
    }
}
