//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use playbox_core::{Email, PersonName, Phone, UserId, UserRole};

/// A registered account as returned by `GET /users/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    #[serde(skip)]
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    pub registration_ts: DateTime<Utc>,
}

/// A validated registration, ready to insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub phone: Option<Phone>,
    pub password_hash: String,
}

/// Login lookup result: who the user is and the hash to verify against.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: UserId,
    pub email: Email,
    pub password_hash: String,
}
