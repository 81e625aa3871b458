//! The auth gate.
//!
//! Per request: no bearer token, or a token that fails verification, is a 401
//! before the handler runs. A valid token yields an [`AuthenticatedUser`]
//! owned by the request. Nothing is shared between requests.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::Span;

use playbox_core::UserId;

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Identity proven by a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(AuthUser(user): AuthUser) -> String {
///     format!("Hello, user {}!", user.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_owned()))?;

        let identity = state.tokens().verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::Unauthorized("Unauthorized".to_owned())
        })?;

        Span::current().record("user_id", tracing::field::display(identity.user_id));
        set_sentry_user(&identity.user_id, Some(&identity.email));

        Ok(Self(AuthenticatedUser {
            user_id: identity.user_id,
            email: identity.email,
        }))
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The scheme is case-insensitive; an empty token counts as missing.
fn extract_bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut split = value.splitn(2, ' ');

    let scheme = split.next()?;
    let token = split.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/cart");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let parts = parts_with(Some("bearer abc"));
        assert_eq!(extract_bearer_token(&parts), Some("abc"));
    }

    #[test]
    fn test_missing_or_wrong_scheme_is_none() {
        assert_eq!(extract_bearer_token(&parts_with(None)), None);
        assert_eq!(extract_bearer_token(&parts_with(Some("Basic abc"))), None);
        assert_eq!(extract_bearer_token(&parts_with(Some("Bearer"))), None);
        assert_eq!(extract_bearer_token(&parts_with(Some("Bearer   "))), None);
    }
}
