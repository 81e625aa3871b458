//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (stamp `x-request-id` on span, Sentry scope and response)
//! 4. Security headers
//! 5. Rate limiting on `/register` and `/login` (governor)
//!
//! The auth gate is an extractor ([`AuthUser`]) rather than a layer, so a
//! handler that needs an identity states it in its signature.

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use auth::{AuthUser, AuthenticatedUser};
pub use rate_limit::auth_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
