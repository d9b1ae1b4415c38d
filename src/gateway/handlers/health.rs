use axum::extract::State;
use std::sync::Arc;

use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResult, ok};

/// GET /api/v1/health
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    match state.db.health_check().await {
        Ok(()) => ok("ok"),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ApiError::service_unavailable("database unreachable").into_err()
        }
    }
}
