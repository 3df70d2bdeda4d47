use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;

/// GET /health
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// GET /ready
pub async fn ready() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "ready": true,
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

pub fn admin_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}
