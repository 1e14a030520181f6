//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use warden_core::traits::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET {base}/health
///
/// Answers 503 while the session store is unreachable, since every
/// authenticated request would fail in that state.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let store_up = match state.cache.health_check().await {
        Ok(up) => up,
        Err(e) => {
            warn!(error = %e.message, "Session store health check failed");
            false
        }
    };

    let (status, label) = if store_up {
        (StatusCode::OK, "UP")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "DOWN")
    };

    (
        status,
        Json(ApiResponse {
            flag: store_up,
            code: if store_up { "SUCCESS" } else { "STORE_UNAVAILABLE" }.to_string(),
            message: format!("Service {label}"),
            data: Some(HealthResponse {
                status: label.to_string(),
                session_store: if store_up { "connected" } else { "unreachable" }.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
        }),
    )
}
