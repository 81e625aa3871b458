//! Health and connectivity probes.

use axum::extract::State;

use crate::db;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Database round trip.
///
/// Returns "pong" if the store answers, 500 otherwise.
pub async fn ping(State(state): State<AppState>) -> Result<&'static str> {
    db::ping(state.pool())
        .await
        .map_err(|e| AppError::Internal(format!("database ping failed: {e}")))?;
    Ok("pong")
}
