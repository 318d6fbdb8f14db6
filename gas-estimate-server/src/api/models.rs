use gas_estimate::TierEstimates;
use serde::{Deserialize, Serialize};

/// Response body of `GET /gas/estimate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasEstimateResponse {
    pub max_priority_fee: PriorityFeeTiers,
}

/// Priority fee per gas for each tier, as decimal wei strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityFeeTiers {
    pub slow: String,
    pub average: String,
    pub fast: String,
}

impl From<TierEstimates> for GasEstimateResponse {
    fn from(estimates: TierEstimates) -> Self {
        Self {
            max_priority_fee: PriorityFeeTiers {
                slow: estimates.slow.to_string(),
                average: estimates.average.to_string(),
                fast: estimates.fast.to_string(),
            },
        }
    }
}
