//! Catalog listing.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::products::ProductRepository;
use crate::error::Result;
use crate::models::product::Product;
use crate::state::AppState;

/// List every product with its category names.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}
