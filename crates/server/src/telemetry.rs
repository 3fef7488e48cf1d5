//! Tracing and metrics setup
//!
//! Logs go through `tracing-subscriber` (pretty, compact or JSON). Metrics go
//! through the `metrics` facade; when no recorder is installed the macros
//! are no-ops, which is what tests rely on.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use predictcare_config::{LogFormat, ObservabilityConfig, Settings};
use predictcare_core::{Condition, RiskAssessment, RiskError};
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

pub const PREDICTIONS_TOTAL: &str = "predictcare_predictions_total";
pub const PREDICTION_ERRORS_TOTAL: &str = "predictcare_prediction_errors_total";
pub const PREDICTION_PROBABILITY: &str = "predictcare_prediction_probability";

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    result.map_err(ServerError::Subscriber)
}

/// Debug-log the effective settings. A render failure is logged, not fatal.
pub fn log_effective_settings(settings: &Settings) -> Option<String> {
    match settings.to_toml() {
        Ok(rendered) => {
            tracing::debug!(config = %rendered, "Effective configuration");
            Some(rendered)
        },
        Err(e) => {
            tracing::warn!(error = %e, "Failed to render effective configuration");
            None
        },
    }
}

/// Install the Prometheus recorder and describe our metrics
pub fn install_metrics_recorder() -> Result<PrometheusHandle, ServerError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(PREDICTIONS_TOTAL, "Successful risk predictions by condition and label");
    describe_counter!(PREDICTION_ERRORS_TOTAL, "Rejected prediction requests by condition and error code");
    describe_histogram!(PREDICTION_PROBABILITY, "Distribution of predicted probabilities");

    Ok(handle)
}

pub fn record_prediction(condition: Condition, outcome: &Result<RiskAssessment, RiskError>) {
    match outcome {
        Ok(assessment) => {
            counter!(
                PREDICTIONS_TOTAL,
                "condition" => condition.slug(),
                "risk" => assessment.risk.as_str()
            )
            .increment(1);
            histogram!(PREDICTION_PROBABILITY, "condition" => condition.slug()).record(assessment.probability);
        },
        Err(error) => {
            counter!(
                PREDICTION_ERRORS_TOTAL,
                "condition" => condition.slug(),
                "code" => error.code()
            )
            .increment(1);
        },
    }
}
