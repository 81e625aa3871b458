//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Registration, login and password change
//! - `token` - Signed identity tokens
//! - `cart` - Cart line upserts and removal
//! - `checkout` - Transactional order placement

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod token;
