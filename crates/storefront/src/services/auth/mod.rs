//! Authentication service.
//!
//! Registration, password login and password change. Passwords are hashed
//! with Argon2id and a random salt; login issues a signed token.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use playbox_core::{Email, PersonName, Phone, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::NewUser;
use crate::services::token::TokenIssuer;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration form as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
}

/// Successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginSession {
    pub token: String,
    pub user_id: UserId,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenIssuer,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, tokens: &'a TokenIssuer) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens,
        }
    }

    /// Register a new customer.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidPerson`, `AuthError::InvalidEmail` or
    /// `AuthError::WeakPassword` for bad input.
    /// Returns `AuthError::UserAlreadyExists` if the email or phone is taken.
    #[tracing::instrument(skip_all)]
    pub async fn register(&self, form: &Registration) -> Result<UserId, AuthError> {
        let new_user = validate_registration(form)?;

        let user_id = self.users.create(&new_user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })?;

        tracing::info!(user_id = %user_id, "User registered");
        Ok(user_id)
    }

    /// Login with email and password and issue a token.
    ///
    /// An unknown email and a wrong password are indistinguishable.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSession, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let credentials = self
            .users
            .get_credentials_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &credentials.password_hash)?;

        let token = self
            .tokens
            .issue(credentials.id, credentials.email.as_str())?;

        tracing::info!(user_id = %credentials.id, "User logged in");
        Ok(LoginSession {
            token,
            user_id: credentials.id,
        })
    }

    /// Replace a user's password after checking the old one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the new password is too short.
    /// Returns `AuthError::InvalidCredentials` if the old password is wrong.
    /// Returns `AuthError::UserNotFound` if the account no longer exists.
    #[tracing::instrument(skip(self, old_password, new_password), fields(user_id = %user_id))]
    pub async fn change_password(
        &self,
        user_id: UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate_password(new_password)?;

        let credentials = self
            .users
            .get_credentials_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(old_password, &credentials.password_hash)?;

        let password_hash = hash_password(new_password)?;
        self.users
            .update_password(user_id, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::UserNotFound,
                other => AuthError::Repository(other),
            })?;

        tracing::info!("Password changed");
        Ok(())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate a registration form and hash its password.
fn validate_registration(form: &Registration) -> Result<NewUser, AuthError> {
    let first_name = PersonName::parse("first_name", &form.first_name)?;
    let last_name = PersonName::parse("last_name", &form.last_name)?;
    let email = Email::parse(&form.email)?;
    validate_password(&form.password)?;
    let phone = form
        .phone
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(Phone::parse)
        .transpose()?;

    Ok(NewUser {
        first_name,
        last_name,
        email,
        phone,
        password_hash: hash_password(&form.password)?,
    })
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> Registration {
        Registration {
            first_name: "Anna".to_string(),
            last_name: "Petrova".to_string(),
            email: "anna@example.com".to_string(),
            phone: Some("79161234567".to_string()),
            password: "hunter22".to_string(),
        }
    }

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong horse", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        assert_ne!(hash_password("abcdef").unwrap(), hash_password("abcdef").unwrap());
    }

    #[test]
    fn test_garbage_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("abcdef", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(validate_password("abcdef").is_ok());
        let err = validate_password("abcde").unwrap_err();
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_valid_registration() {
        let user = validate_registration(&form()).unwrap();
        assert_eq!(user.first_name.as_str(), "Anna");
        assert_eq!(user.phone.unwrap().as_str(), "79161234567");
        assert!(verify_password("hunter22", &user.password_hash).is_ok());
    }

    #[test]
    fn test_missing_or_empty_phone_is_none() {
        let mut f = form();
        f.phone = None;
        assert!(validate_registration(&f).unwrap().phone.is_none());

        f.phone = Some(String::new());
        assert!(validate_registration(&f).unwrap().phone.is_none());
    }

    #[test]
    fn test_registration_field_messages() {
        let mut f = form();
        f.first_name = "Anna1".to_string();
        assert_eq!(
            validate_registration(&f).unwrap_err().to_string(),
            "first_name must contain only letters"
        );

        let mut f = form();
        f.last_name = String::new();
        assert_eq!(
            validate_registration(&f).unwrap_err().to_string(),
            "last_name must be between 1 and 50 characters"
        );

        let mut f = form();
        f.phone = Some("123".to_string());
        assert_eq!(
            validate_registration(&f).unwrap_err().to_string(),
            "phone must be exactly 11 digits"
        );

        let mut f = form();
        f.email = "anna.example.com".to_string();
        assert!(matches!(
            validate_registration(&f),
            Err(AuthError::InvalidEmail(_))
        ));
    }
}
