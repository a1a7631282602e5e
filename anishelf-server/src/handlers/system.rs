use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::warn;

use crate::infra::{app_state::AppState, errors::AppError};

pub async fn welcome_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the Anime API!" }))
}

/// 200 when the store answers a probe, 503 otherwise.
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    match state.catalog().health().await {
        Ok(()) => {
            health_status["checks"]["storage"] = json!({
                "status": "healthy",
                "backend": format!("{:?}", state.backend).to_lowercase(),
            });
            (StatusCode::OK, Json(health_status)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "health probe failed");
            health_status["status"] = json!("unhealthy");
            health_status["checks"]["storage"] = json!({
                "status": "unhealthy",
                "error": e.to_string()
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(health_status))
                .into_response()
        }
    }
}

pub async fn not_found_handler() -> AppError {
    AppError::not_found("Not Found")
}
