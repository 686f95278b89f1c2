//! Liveness handlers.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /
pub async fn root_index() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "AgriConnect Server is running!",
    })
}

/// GET /api/health
pub async fn api_health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "API is healthy!",
    })
}
