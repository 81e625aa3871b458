//! Request extractors whose rejections are [`AppError`]s.
//!
//! axum's own `Json` and `Path` reject with their own status codes (415, 422)
//! and bodies; wrapping them makes every malformed body or path a 400 with a
//! short message.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor; any rejection is a 400.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor; any rejection is a 400.
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
