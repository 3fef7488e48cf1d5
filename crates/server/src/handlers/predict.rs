//! Prediction endpoints
//!
//! POST /api/predict/:condition
//! POST /api/explain/:condition
//! GET  /api/conditions
//!
//! The body is taken as raw JSON and converted to an `AttributeRecord` here so
//! that a non-object body maps to `invalid_record` rather than a generic
//! deserialization rejection.

use axum::{
    extract::{rejection::JsonRejection, Path},
    Json,
};
use predictcare_core::{catalog, AttributeRecord, Condition, ConditionProfile, RiskAssessment, RiskBreakdown};
use serde_json::Value;

use crate::{error::ApiError, telemetry};

fn parse_request(
    condition: &str,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(Condition, AttributeRecord), ApiError> {
    let condition: Condition = condition.parse()?;
    let Json(value) = body?;
    let record = AttributeRecord::from_value(value)?;
    Ok((condition, record))
}

pub async fn predict(
    Path(condition): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let (condition, record) = parse_request(&condition, body)?;

    let outcome = condition.scorer().assess(&record);
    telemetry::record_prediction(condition, &outcome);

    Ok(Json(outcome?))
}

pub async fn explain(
    Path(condition): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RiskBreakdown>, ApiError> {
    let (condition, record) = parse_request(&condition, body)?;

    let breakdown = condition.scorer().explain(&record)?;
    Ok(Json(breakdown))
}

pub async fn list_conditions() -> Json<Vec<ConditionProfile>> {
    Json(catalog())
}
