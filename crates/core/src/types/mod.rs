//! Core types for Playbox.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod card;
pub mod email;
pub mod id;
pub mod person;
pub mod status;

pub use card::{CardError, CardExpiry, CardNumber};
pub use email::{Email, EmailError};
pub use id::*;
pub use person::{PersonError, PersonName, Phone};
pub use status::*;
