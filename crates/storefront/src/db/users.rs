//! User repository for database operations.

use sqlx::{FromRow, PgPool, Row, postgres::PgRow};

use playbox_core::{Email, UserId, UserRole};

use super::{RepositoryError, conflict_on_unique};
use crate::models::user::{NewUser, User, UserCredentials};

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("user_id")?,
            role: row.try_get("role")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            profile_picture_url: row.try_get("profile_picture_url")?,
            registration_ts: row.try_get("registration_ts")?,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT user_id, role, first_name, last_name, email, phone,
                   profile_picture_url, registration_ts
            FROM users
            WHERE user_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create a customer account.
    ///
    /// A missing phone is stored as `NULL`, so any number of phone-less users
    /// can coexist under the unique constraint.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or phone already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new_user: &NewUser) -> Result<UserId, RepositoryError> {
        let id: UserId = sqlx::query_scalar(
            r"
            INSERT INTO users (role, first_name, last_name, email, phone, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING user_id
            ",
        )
        .bind(UserRole::Customer)
        .bind(new_user.first_name.as_str())
        .bind(new_user.last_name.as_str())
        .bind(&new_user.email)
        .bind(new_user.phone.as_ref().map(playbox_core::Phone::as_str))
        .bind(&new_user.password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "email or phone already exists"))?;

        Ok(id)
    }

    /// Get the id and password hash for an email, for login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let row = sqlx::query("SELECT user_id, email, password_hash FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        row.map(|r| credentials_from_row(&r)).transpose()
    }

    /// Get the id and password hash for a user, for password change.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_credentials_by_id(
        &self,
        id: UserId,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let row = sqlx::query("SELECT user_id, email, password_hash FROM users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(|r| credentials_from_row(&r)).transpose()
    }

    /// Replace a user's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE user_id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn credentials_from_row(row: &PgRow) -> Result<UserCredentials, RepositoryError> {
    let email: String = row.try_get("email")?;
    let email = Email::parse(&email).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
    })?;

    Ok(UserCredentials {
        id: row.try_get("user_id")?,
        email,
        password_hash: row.try_get("password_hash")?,
    })
}
