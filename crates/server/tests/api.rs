//! End-to-end checks against the router, driven with `tower::ServiceExt::oneshot`

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use predictcare_config::Settings;
use predictcare_server::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_router(AppState::new(Settings::default()))
}

fn app_with(settings: Settings) -> Router {
    create_router(AppState::new(settings))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn probability(body: &Value) -> f64 {
    body["probability"].as_f64().unwrap()
}

#[tokio::test]
async fn test_predict_chd() {
    let (status, body) = send(
        app(),
        post_json(
            "/api/predict/chd",
            &json!({ "age": 55, "male": "1", "currentSmoker": "1", "cigsPerDay": 15, "totChol": 250 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!((probability(&body) - 4.5 / 11.5).abs() < 1e-9);
    assert_eq!(body["risk"], "Moderate");
}

#[tokio::test]
async fn test_predict_stroke() {
    let (status, body) = send(
        app(),
        post_json(
            "/api/predict/stroke",
            &json!({
                "age": 70,
                "hypertension": "1",
                "avg_glucose_level": "150",
                "bmi": "32",
                "gender": "Male"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!((probability(&body) - 0.662).abs() < 1e-3);
    assert_eq!(body["risk"], "Moderate");
}

#[tokio::test]
async fn test_predict_diabetes_empty_record() {
    let (status, body) = send(app(), post_json("/api/predict/diabetes", &json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(probability(&body), 0.0);
    assert_eq!(body["risk"], "Low");
}

#[tokio::test]
async fn test_predict_diabetes_form_field_names() {
    let (status, body) = send(
        app(),
        post_json(
            "/api/predict/diabetes",
            &json!({ "Age": 52, "BMI": "31.2", "FPG": 130, "family_histroy": "1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!((probability(&body) - 4.8 / 10.4).abs() < 1e-9);
}

#[tokio::test]
async fn test_malformed_numeric_is_bad_request() {
    let (status, body) = send(
        app(),
        post_json("/api/predict/stroke", &json!({ "avg_glucose_level": "not-a-number" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "malformed_numeric");
    assert_eq!(body["error"]["field"], "avg_glucose_level");
}

#[tokio::test]
async fn test_decimal_string_for_integer_field() {
    let (status, body) = send(app(), post_json("/api/predict/diabetes", &json!({ "sbp": "140.5" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "sbp");
}

#[tokio::test]
async fn test_non_object_body_is_invalid_record() {
    let (status, body) = send(app(), post_json("/api/predict/chd", &json!([1, 2, 3]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_record");
    assert_eq!(body["error"]["field"], Value::Null);
}

#[tokio::test]
async fn test_unparseable_body_is_invalid_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/predict/chd")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_body");
}

#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/predict/chd")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"]["code"], "invalid_body");
}

#[tokio::test]
async fn test_unknown_condition_is_not_found() {
    let (status, body) = send(app(), post_json("/api/predict/asthma", &json!({}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "unknown_condition");
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(), get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy", "message": "PredictCare API is running" }));
}

#[tokio::test]
async fn test_index_uses_configured_greeting() {
    let mut settings = Settings::default();
    settings.service.greeting = "hello".to_string();
    let (status, body) = send(app_with(settings), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "hello" }));
}

#[tokio::test]
async fn test_conditions_catalog() {
    let (status, body) = send(app(), get("/api/conditions")).await;

    assert_eq!(status, StatusCode::OK);
    let conditions: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["condition"].as_str().unwrap())
        .collect();
    assert_eq!(conditions, ["chd", "stroke", "diabetes"]);
    assert_eq!(body[0]["max_factors"], 11.5);
}

#[tokio::test]
async fn test_explain_lists_contributions() {
    let (status, body) = send(
        app(),
        post_json(
            "/api/explain/chd",
            &json!({ "age": 55, "male": "1", "currentSmoker": "1", "cigsPerDay": 15, "totChol": 250 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["condition"], "chd");
    assert!((body["risk_factors"].as_f64().unwrap() - 4.5).abs() < 1e-9);
    let factors: Vec<&str> = body["contributions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["factor"].as_str().unwrap())
        .collect();
    assert!(factors.contains(&"heavy_smoker"));
    assert!(factors.contains(&"total_cholesterol"));
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/predict/chd")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_restricted_origins() {
    let mut settings = Settings::default();
    settings.cors.allowed_origins = vec!["http://clinic.example".to_string()];

    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "http://other.example")
        .body(Body::empty())
        .unwrap();
    let response = app_with(settings.clone()).oneshot(request).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());

    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "http://clinic.example")
        .body(Body::empty())
        .unwrap();
    let response = app_with(settings).oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://clinic.example"
    );
}

#[tokio::test]
async fn test_body_limit() {
    let mut settings = Settings::default();
    settings.server.max_body_bytes = 64;
    let padding = "x".repeat(256);
    let (status, body) = send(
        app_with(settings),
        post_json("/api/predict/chd", &json!({ "note": padding })),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "invalid_body");
}

#[tokio::test]
async fn test_metrics_route_absent_without_recorder() {
    let (status, body) = send(app(), get("/metrics")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_wrong_method() {
    let response = app().oneshot(get("/api/predict/chd")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
