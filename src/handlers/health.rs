use axum::response::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppResult;

/// `GET /analyze` — liveness probe kept on the analysis path so frontends
/// can check the backend with the same base URL they upload to.
pub async fn analyze_health_handler() -> AppResult<Json<Value>> {
    Ok(Json(json!({
        "status": "healthy",
        "message": "Backend is running"
    })))
}

/// `GET /health` — deployment health check with version info.
pub async fn health_handler() -> AppResult<Json<Value>> {
    info!("Health check requested");

    Ok(Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
