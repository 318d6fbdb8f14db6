use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::{api::get_gas_estimate, service::EstimateService};

/// Create the Axum application router
pub fn create_app(service: Arc<EstimateService>) -> Router {
    Router::new()
        // Fee estimation endpoint
        .route("/gas/estimate", get(get_gas_estimate))
        // Health check endpoint
        .route("/health", get(health_check))
        // Add shared state
        .with_state(service)
        // Add middleware
        .layer(CatchPanicLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Run the HTTP server
pub async fn run_server(app: Router, host: &str, port: u16) -> Result<(), std::io::Error> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("HTTP server listening on http://{}", addr);
    info!("API endpoints:");
    info!("  GET /gas/estimate - Slow, average and fast priority fees");
    info!("  GET /health - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(std::io::Error::other)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install CTRL+C signal handler: {}", e);
        // Without a signal handler the server runs until killed
        std::future::pending::<()>().await;
    }

    info!("Received shutdown signal, shutting down gracefully...");
}
