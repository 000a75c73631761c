//! Home and health check endpoints.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: String,
}

/// Service banner.
pub async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Ready Set Insure portal API"
    }))
}

/// Health check endpoint.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}
