use axum::http::StatusCode;
use gas_estimate::{RawFeeHistory, U256};
use gas_estimate_server::api::{ErrorResponse, GasEstimateResponse, PriorityFeeTiers};
use gas_estimate_server::provider::{EthRpcConfig, MockEthClient, Provider};
use gas_estimate_server::server::create_app;
use gas_estimate_server::service::EstimateService;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Three blocks ending at block 100 with constant rewards
fn reference_history() -> RawFeeHistory {
    RawFeeHistory {
        oldest_block: U256::from(100),
        base_fee_per_gas: vec![U256::from(100), U256::from(200), U256::from(300)],
        gas_used_ratio: vec![0.25, 0.5, 0.75],
        reward: vec![vec![U256::from(500), U256::from(600), U256::from(700)]; 3],
    }
}

fn create_test_app(provider: Provider, block_scan: &str) -> axum::Router {
    create_app(Arc::new(EstimateService::new(provider, block_scan)))
}

async fn get(app: axum::Router, uri: &str) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .uri(uri)
                .body(axum::body::Body::empty())?,
        )
        .await?;

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, body.to_vec()))
}

#[tokio::test]
async fn test_health_endpoint() -> anyhow::Result<()> {
    let app = create_test_app(Provider::Mock(MockEthClient::new()), "10");

    let (status, body) = get(app, "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");

    Ok(())
}

#[tokio::test]
async fn test_reference_estimate() -> anyhow::Result<()> {
    let mock = MockEthClient::new()
        .with_latest_block(U256::from(100))
        .with_fee_history(reference_history());
    let app = create_test_app(Provider::Mock(mock), "3");

    let (status, body) = get(app, "/gas/estimate").await?;
    assert_eq!(status, StatusCode::OK);

    let response: GasEstimateResponse = serde_json::from_slice(&body)?;
    assert_eq!(
        response,
        GasEstimateResponse {
            max_priority_fee: PriorityFeeTiers {
                slow: "500".to_string(),
                average: "600".to_string(),
                fast: "700".to_string(),
            },
        }
    );

    Ok(())
}

#[tokio::test]
async fn test_repeated_requests_are_identical() -> anyhow::Result<()> {
    let mock = MockEthClient::new().with_fee_history(reference_history());
    let app = create_test_app(Provider::Mock(mock), "3");

    let (_, first) = get(app.clone(), "/gas/estimate").await?;
    let (_, second) = get(app, "/gas/estimate").await?;
    assert_eq!(first, second);

    Ok(())
}

#[tokio::test]
async fn test_invalid_block_scan() -> anyhow::Result<()> {
    let mock = MockEthClient::new().with_fee_history(reference_history());
    let app = create_test_app(Provider::Mock(mock.clone()), "abc");

    let (status, body) = get(app, "/gas/estimate").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = serde_json::from_slice(&body)?;
    assert_eq!(error.error_type, "ConfigurationError");
    assert_eq!(error.status, "Internal Server Error");

    assert_eq!(mock.latest_block_calls(), 1);
    assert!(mock.fee_history_requests().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_json_rpc_provider_end_to_end() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({ "method": "eth_getBlockByNumber" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "number": "0x121eac0" }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({ "method": "eth_feeHistory" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 2,
            "result": {
                "oldestBlock": "0x121eabe",
                "baseFeePerGas": ["0x5d21dba00", "0x5d21dba00", "0x5d21dba00", "0x5d21dba00"],
                "gasUsedRatio": [0.5, 0.6, 0.4],
                "reward": [
                    ["0x3b9aca00", "0x59682f00", "0x77359400"],
                    ["0x3b9aca00", "0x59682f00", "0x77359400"],
                    ["0x3b9aca01", "0x59682f00", "0x77359401"]
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let provider = Provider::Rpc(EthRpcConfig {
        url: mock_server.uri(),
        timeout: Duration::from_secs(5),
    });
    let app = create_test_app(provider, "3");

    let (status, body) = get(app, "/gas/estimate").await?;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(
        json,
        serde_json::json!({
            "maxPriorityFee": {
                "slow": "1000000000",
                "average": "1500000000",
                "fast": "2000000000"
            }
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_json_rpc_fee_history_error() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({ "method": "eth_getBlockByNumber" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "number": "0x64" }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({ "method": "eth_feeHistory" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 2,
            "error": { "code": -32601, "message": "the method eth_feeHistory does not exist" }
        })))
        .mount(&mock_server)
        .await;

    let provider = Provider::Rpc(EthRpcConfig {
        url: mock_server.uri(),
        timeout: Duration::from_secs(5),
    });
    let app = create_test_app(provider, "3");

    let (status, body) = get(app, "/gas/estimate").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = serde_json::from_slice(&body)?;
    assert_eq!(
        error,
        ErrorResponse {
            message: "Failed to obtain fee history.".to_string(),
            title: "Provider query failed".to_string(),
            status: "Internal Server Error".to_string(),
            error_type: "ProviderError".to_string(),
        }
    );

    Ok(())
}
