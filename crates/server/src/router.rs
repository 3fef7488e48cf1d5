//! Route table and middleware stack

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, Uri},
    routing::{get, post},
    Router,
};
use predictcare_config::CorsConfig;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    error::ApiError,
    handlers::{health, metrics, predict},
    state::AppState,
};

pub fn create_router(state: AppState) -> Router {
    let server = &state.settings.server;
    let observability = &state.settings.observability;

    let mut router = Router::new()
        .route("/", get(health::index))
        .route("/api/health", get(health::health_check))
        .route("/api/conditions", get(predict::list_conditions))
        .route("/api/predict/:condition", post(predict::predict))
        .route("/api/explain/:condition", post(predict::explain));

    if let Some(handle) = state.metrics.clone() {
        router = router.route(
            &observability.metrics_path,
            get(move || metrics::render(handle.clone())),
        );
    }

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&state.settings.cors));

    router
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(middleware)
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.allows_any() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping invalid CORS origin");
                None
            },
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
