use crate::config::MODEL_NAME;
use crate::services::get_metrics;
use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "colorizer-service",
        "version": env!("CARGO_PKG_VERSION"),
        "model": MODEL_NAME,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn list_models() -> impl IntoResponse {
    Json(json!({
        "models": [
            {
                "name": MODEL_NAME,
                "description": "Example-based manga colorization using reference images",
                "type": "image-to-image",
                "status": "active"
            }
        ]
    }))
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
