//! Public user profiles.

use axum::{Json, extract::State};
use tracing::instrument;

use playbox_core::UserId;

use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::extract::ApiPath;
use crate::models::user::User;
use crate::state::AppState;

/// Fetch a profile by id. A non-numeric id is a 400, an unknown one a 404.
#[instrument(skip_all, fields(user_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<User>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

    Ok(Json(user))
}
