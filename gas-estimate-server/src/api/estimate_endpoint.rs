use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{error, info};

use super::{error::ApiError, models::GasEstimateResponse};
use crate::service::EstimateService;

/// GET /gas/estimate - Returns slow, average and fast priority fees
pub async fn get_gas_estimate(State(service): State<Arc<EstimateService>>) -> Response {
    info!("Received request for gas estimate");

    match service.estimate().await {
        Ok(estimates) => {
            let response = GasEstimateResponse::from(estimates);
            info!("Gas estimate response: {:?}", response);
            Json(response).into_response()
        }
        Err(err) => {
            error!(kind = err.kind(), "Gas estimate failed: {}", err);
            ApiError::from(err).into_response()
        }
    }
}
