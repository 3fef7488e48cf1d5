//! PredictCare HTTP service
//!
//! Thin axum layer over `predictcare-core`: routes, error envelope,
//! CORS, tracing and Prometheus metrics.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod telemetry;

pub use error::{ApiError, ServerError};
pub use router::create_router;
pub use state::AppState;

use metrics_exporter_prometheus::PrometheusHandle;
use predictcare_config::Settings;
use tokio::net::TcpListener;

/// Bind the configured address and serve until Ctrl+C
pub async fn serve(settings: Settings, metrics: Option<PrometheusHandle>) -> Result<(), ServerError> {
    let addr = settings.server.socket_addr()?;

    let mut state = AppState::new(settings);
    if let Some(handle) = metrics {
        state = state.with_metrics(handle);
    }
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "PredictCare API listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
