//! Shared application state
//!
//! Immutable after startup. Scorers are `static` in the core crate and are
//! not part of the state.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use predictcare_config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    /// Present only when a Prometheus recorder was installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
