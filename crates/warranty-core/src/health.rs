use axum::http::StatusCode;

/// Handler for `GET /health`: liveness check.
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
