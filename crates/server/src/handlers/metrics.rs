//! Prometheus scrape endpoint
//!
//! Only mounted when a recorder was installed, so the handle is always present.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use metrics_exporter_prometheus::PrometheusHandle;

const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

pub async fn render(handle: PrometheusHandle) -> Response {
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], handle.render()).into_response()
}
