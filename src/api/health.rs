use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::DatabaseConnection;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn health_check(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let (status, health, database) = match db.ping().await {
        Ok(()) => (StatusCode::OK, "ok", "up"),
        Err(e) => {
            tracing::error!("Health check failed to reach the database: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
        }
    };

    (
        status,
        Json(json!({
            "status": health,
            "service": "video-rental",
            "database": database,
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
