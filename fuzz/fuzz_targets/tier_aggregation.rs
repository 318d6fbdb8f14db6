#![no_main]

use gas_estimate::{RawFeeHistory, Tier, TierEstimates, U256};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }

    let oldest_block = u64::from_le_bytes([
        data[0], data[1], data[2], data[3], data[4], data[5], data[6], data[7],
    ]);
    let window = u64::from(data[8]);

    // Every 8 bytes become one fee, three fees form a reward row
    let fees: Vec<U256> = data[9..]
        .chunks_exact(8)
        .map(|chunk| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            U256::from(u64::from_le_bytes(bytes))
        })
        .collect();
    let reward: Vec<Vec<U256>> = fees.chunks(3).map(<[U256]>::to_vec).collect();
    let blocks = reward.len();

    let history = RawFeeHistory {
        oldest_block: U256::from(oldest_block),
        base_fee_per_gas: vec![U256::from(1u64); blocks + 1],
        gas_used_ratio: vec![0.5; blocks],
        reward,
    };

    if let Ok(estimates) = TierEstimates::from_fee_history(&history, window) {
        // The mean of a column never exceeds its largest entry
        for tier in Tier::ALL {
            let max = history.reward[..window as usize]
                .iter()
                .map(|row| row[tier.index()])
                .max()
                .unwrap_or_default();
            assert!(estimates.get(tier) <= max);
        }
    }
});
