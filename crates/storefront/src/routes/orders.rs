//! Order history.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::orders::OrderRepository;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::order::OrderSummary;
use crate::state::AppState;

/// List the caller's orders, newest first.
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn index(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<OrderSummary>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.user_id)
        .await?;
    Ok(Json(orders))
}
