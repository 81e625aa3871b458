//! Checkout route handler.

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::extract::ApiJson;
use crate::middleware::AuthUser;
use crate::services::checkout::{CheckoutItem, CheckoutService};
use crate::state::AppState;

/// Body of `POST /checkout`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

/// Place an order for the listed items.
///
/// 204 with no body on success. An empty list is a 400 and never opens a
/// transaction.
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn checkout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> Result<StatusCode> {
    let order_id = CheckoutService::new(state.pool())
        .checkout(user.user_id, &request.items)
        .await?;

    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("order_id", order_id.to_string().as_str())]),
    );
    Ok(StatusCode::NO_CONTENT)
}
