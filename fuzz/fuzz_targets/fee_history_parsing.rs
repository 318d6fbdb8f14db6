#![no_main]

use gas_estimate::{RawFeeHistory, TierEstimates};
use libfuzzer_sys::fuzz_target;

// Fuzz eth_feeHistory payload decoding followed by estimation
fuzz_target!(|data: &[u8]| {
    let Some((&window, payload)) = data.split_first() else {
        return;
    };

    if let Ok(history) = serde_json::from_slice::<RawFeeHistory>(payload) {
        // Malformed payloads must come back as errors, never panics
        let _ = TierEstimates::from_fee_history(&history, u64::from(window));
    }
});
