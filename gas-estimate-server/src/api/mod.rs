//! HTTP API endpoints for the gas estimate service

mod error;
mod estimate_endpoint;
mod models;

pub use error::{ApiError, ErrorResponse, ESTIMATE_FAILURE_STATUS};
pub use estimate_endpoint::get_gas_estimate;
pub use models::{GasEstimateResponse, PriorityFeeTiers};
