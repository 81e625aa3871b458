//! Registration, login and password change.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use playbox_core::UserId;

use crate::error::{Result, add_breadcrumb};
use crate::extract::ApiJson;
use crate::middleware::AuthUser;
use crate::services::auth::{AuthService, LoginSession, Registration};
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Password change request body.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Registration response body.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: UserId,
}

/// Create an account.
///
/// 201 with `{user_id}`; 400 on invalid fields; 409 if the email or phone is
/// already registered.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<Registration>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let user_id = AuthService::new(state.pool(), state.tokens())
        .register(&form)
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id })))
}

/// Exchange email and password for a token.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginSession>> {
    let session = AuthService::new(state.pool(), state.tokens())
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(session))
}

/// Change the caller's password.
///
/// 204 on success; 401 if the old password is wrong.
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> Result<StatusCode> {
    AuthService::new(state.pool(), state.tokens())
        .change_password(user.user_id, &request.old_password, &request.new_password)
        .await?;

    add_breadcrumb("auth", "Password changed", None);
    Ok(StatusCode::NO_CONTENT)
}
