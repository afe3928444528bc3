use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::services::metrics;

/// GET /metrics: Prometheus text exposition.
pub async fn get_metrics() -> Response {
    (
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        metrics::render(),
    )
        .into_response()
}

/// GET /health
pub async fn health_check() -> Response {
    (
        StatusCode::OK,
        [("Content-Type", "application/json")],
        r#"{"status":"healthy"}"#,
    )
        .into_response()
}
