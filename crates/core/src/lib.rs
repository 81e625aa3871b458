//! Playbox Core - Shared domain types.
//!
//! This crate provides the types used across the Playbox components:
//! - `storefront` - The JSON API (auth, catalog, cart, cards, checkout)
//! - `cli` - Migrations and demo data seeding
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. The optional `postgres` feature adds `sqlx` encoding so
//! the storefront can bind these types directly into queries.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, validated value types, statuses and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
