//! Cart route handlers. Every route requires a token.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use playbox_core::ProductId;

use crate::error::{Result, add_breadcrumb};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::AuthUser;
use crate::models::cart::CartItem;
use crate::services::cart::CartService;
use crate::state::AppState;

/// Body of `POST /cart/items`. `quantity` is a signed delta.
#[derive(Debug, Deserialize)]
pub struct CartItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// List the caller's cart.
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn show(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<CartItem>>> {
    let items = CartService::new(state.pool()).list(user.user_id).await?;
    Ok(Json(items))
}

/// Add to, or take from, one cart line.
#[instrument(skip_all, fields(user_id = %user.user_id, product_id = %request.product_id))]
pub async fn upsert_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CartItemRequest>,
) -> Result<StatusCode> {
    CartService::new(state.pool())
        .upsert(user.user_id, request.product_id, request.quantity)
        .await?;

    add_breadcrumb(
        "cart",
        "Updated cart line",
        Some(&[("product_id", request.product_id.to_string().as_str())]),
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Drop one line from the caller's cart.
#[instrument(skip_all, fields(user_id = %user.user_id, product_id = %product_id))]
pub async fn remove_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(product_id): ApiPath<ProductId>,
) -> Result<StatusCode> {
    CartService::new(state.pool())
        .remove(user.user_id, product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
