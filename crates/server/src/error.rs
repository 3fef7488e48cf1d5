//! Server error types
//!
//! `ApiError` is what handlers return; it renders as
//! `{"error": {"code", "message", "field"}}` with a matching status.
//! `ServerError` covers startup failures.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use predictcare_config::ConfigError;
use predictcare_core::RiskError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("no route for {0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Risk(RiskError::UnknownCondition(_)) => StatusCode::NOT_FOUND,
            ApiError::Risk(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Risk(e) => e.code(),
            ApiError::InvalidBody { .. } => "invalid_body",
            ApiError::NotFound(_) => "not_found",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let field = match &self {
            ApiError::Risk(e) => e.field(),
            _ => None,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(code = self.code(), error = %self, "Rejected request");
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "field": field,
            }
        }));
        (status, body).into_response()
    }
}

/// Startup and serve failures
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("failed to install metrics recorder: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use predictcare_core::NumericKind;

    #[test]
    fn test_status_mapping() {
        let malformed = ApiError::from(RiskError::MalformedNumeric {
            field: "bmi",
            value: "\"x\"".to_string(),
            expected: NumericKind::Float,
        });
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
        assert_eq!(malformed.code(), "malformed_numeric");

        let unknown = ApiError::from(RiskError::UnknownCondition("asthma".to_string()));
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        let invalid = ApiError::from(RiskError::InvalidRecord { found: "array" });
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.code(), "invalid_record");
    }

    #[test]
    fn test_log_filter_error_keeps_source() {
        let parse_error = tracing_subscriber::EnvFilter::try_new("predictcare=loud").unwrap_err();
        let error = ServerError::from(parse_error);
        assert!(matches!(error, ServerError::LogFilter(_)));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NotFound("/nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
