//! Property-based tests for gas-estimate
//!
//! These tests check the arithmetic invariants of the tier aggregation
//! for arbitrary fee histories.

use gas_estimate::{
    average_priority_fee, normalize, ComputeError, RawFeeHistory, Tier, TierEstimates, U256,
};
use proptest::prelude::*;

/// Generate a fee history whose reward rows carry arbitrary u128 fees
fn fee_history_strategy() -> impl Strategy<Value = (RawFeeHistory, u64)> {
    (
        prop::collection::vec(prop::array::uniform3(any::<u128>()), 1..32),
        1_000u64..20_000_000u64,
    )
        .prop_map(|(rows, oldest_block)| {
            let blocks = rows.len();
            let history = RawFeeHistory {
                oldest_block: U256::from(oldest_block),
                base_fee_per_gas: vec![U256::from(30_000_000_000u64); blocks + 1],
                gas_used_ratio: vec![0.5; blocks],
                reward: rows
                    .into_iter()
                    .map(|row| row.iter().map(|fee| U256::from(*fee)).collect())
                    .collect(),
            };
            (history, blocks as u64)
        })
}

proptest! {
    #[test]
    fn prop_average_is_floor_of_mean((history, window) in fee_history_strategy()) {
        let records = normalize(&history, window).unwrap();
        let n = U256::from(records.len());

        for tier in Tier::ALL {
            let sum = history
                .reward
                .iter()
                .fold(U256::ZERO, |acc, row| acc + row[tier.index()]);
            let average = average_priority_fee(&records, tier).unwrap();

            prop_assert!(average * n <= sum);
            prop_assert!(sum < average * n + n);
        }
    }

    #[test]
    fn prop_constant_rewards_average_to_themselves(
        fee in any::<u128>(),
        blocks in 1usize..64,
    ) {
        let history = RawFeeHistory {
            oldest_block: U256::from(1_000_000u64),
            base_fee_per_gas: vec![U256::from(1u64); blocks + 1],
            gas_used_ratio: vec![1.0; blocks],
            reward: vec![vec![U256::from(fee); 3]; blocks],
        };

        let estimates = TierEstimates::from_fee_history(&history, blocks as u64).unwrap();
        for tier in Tier::ALL {
            prop_assert_eq!(estimates.get(tier), U256::from(fee));
        }
    }

    #[test]
    fn prop_record_count_matches_window(
        (history, blocks) in fee_history_strategy(),
        shrink in 0u64..8,
    ) {
        let window = blocks.saturating_sub(shrink);
        let records = normalize(&history, window).unwrap();
        prop_assert_eq!(records.len() as u64, window);
    }

    #[test]
    fn prop_window_beyond_payload_is_rejected(
        (history, blocks) in fee_history_strategy(),
        extra in 1u64..8,
    ) {
        let result = normalize(&history, blocks + extra);
        let is_short = matches!(result, Err(ComputeError::ShortFeeHistory { .. }));
        prop_assert!(is_short);
    }
}
