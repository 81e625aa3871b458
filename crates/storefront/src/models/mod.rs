//! Domain models for the storefront.
//!
//! Response types serialize straight to the JSON the API returns; row
//! decoding lives next to the queries in [`crate::db`].

pub mod card;
pub mod cart;
pub mod order;
pub mod product;
pub mod user;
