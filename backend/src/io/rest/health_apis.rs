use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use shared::HealthResponse;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
    };
    (StatusCode::OK, Json(response))
}
