//! Signed identity tokens.
//!
//! Tokens are HS256 JWTs carrying `{user_id, email, iat, exp}`. They are not
//! persisted; a token is valid exactly when its signature checks out against
//! the process secret and `now <= exp`. There is no refresh and no revocation.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use playbox_core::UserId;

/// Reasons a token is rejected or cannot be produced.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Not a well-formed JWT, or claims of the wrong shape.
    #[error("malformed token")]
    Malformed,
    /// Signature does not match the signing secret.
    #[error("bad token signature")]
    BadSignature,
    /// The token's `exp` is in the past.
    #[error("token expired")]
    Expired,
    /// Signing failed.
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    pub email: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Identity recovered from a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
}

/// Issues and verifies tokens with one process-wide secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Build an issuer from the signing secret and token lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX),
        }
    }

    /// Issue a token valid from now for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if signing fails.
    pub fn issue(&self, user_id: UserId, email: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if signing fails or the expiry overflows.
    pub fn issue_at(
        &self,
        user_id: UserId,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Encoding("token lifetime out of range".to_owned()))?;
        let claims = Claims {
            user_id,
            email: email.to_owned(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    ///
    /// Returns the reason the token is not acceptable.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// A token is expired when `now > exp`; a token checked at its exact
    /// expiry second is still valid.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Malformed`, `TokenError::BadSignature` or
    /// `TokenError::Expired`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        // Expiry is checked below against `now`, not the wall clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            },
        )?;

        if now.timestamp() > data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(Identity {
            user_id: data.claims.user_id,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SECRET: &str = "kV9#pL2$wQ7!zX4@mN8&rT1*yU5^bH3%";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(
            &SecretString::from(SECRET),
            Duration::from_secs(24 * 60 * 60),
        )
    }

    fn issued_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_roundtrip_identity() {
        let issuer = issuer();
        let token = issuer
            .issue_at(UserId::new(42), "anna@example.com", issued_at())
            .unwrap();

        let identity = issuer.verify_at(&token, issued_at()).unwrap();
        assert_eq!(identity.user_id, UserId::new(42));
        assert_eq!(identity.email, "anna@example.com");
    }

    #[test]
    fn test_valid_just_before_lifetime_ends() {
        let issuer = issuer();
        let token = issuer
            .issue_at(UserId::new(1), "a@b.io", issued_at())
            .unwrap();

        let later = issued_at() + chrono::Duration::minutes(23 * 60 + 59);
        assert!(issuer.verify_at(&token, later).is_ok());
    }

    #[test]
    fn test_expired_just_after_lifetime_ends() {
        let issuer = issuer();
        let token = issuer
            .issue_at(UserId::new(1), "a@b.io", issued_at())
            .unwrap();

        let later = issued_at() + chrono::Duration::minutes(24 * 60 + 1);
        assert!(matches!(
            issuer.verify_at(&token, later),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_expiry_boundary_is_strict() {
        let issuer = issuer();
        let token = issuer
            .issue_at(UserId::new(1), "a@b.io", issued_at())
            .unwrap();
        let exp = issued_at() + chrono::Duration::hours(24);

        assert!(issuer.verify_at(&token, exp).is_ok());
        assert!(matches!(
            issuer.verify_at(&token, exp + chrono::Duration::seconds(1)),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issuer()
            .issue_at(UserId::new(1), "a@b.io", issued_at())
            .unwrap();
        let other = TokenIssuer::new(
            &SecretString::from("Zq8!Lm3#Rt6$Wx1^Pv4&Ny7*Kb2%Hd5@"),
            Duration::from_secs(60),
        );

        assert!(matches!(
            other.verify_at(&token, issued_at()),
            Err(TokenError::BadSignature)
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let issuer = issuer();
        let token = issuer
            .issue_at(UserId::new(1), "a@b.io", issued_at())
            .unwrap();
        let forged = issuer
            .issue_at(UserId::new(2), "a@b.io", issued_at())
            .unwrap();

        // Splice the second token's payload onto the first token's signature.
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = forged.split('.').nth(1).unwrap();
        parts[1] = forged_payload;
        let spliced = parts.join(".");

        assert!(matches!(
            issuer.verify_at(&spliced, issued_at()),
            Err(TokenError::BadSignature)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let issuer = issuer();
        assert!(matches!(
            issuer.verify_at("not-a-token", issued_at()),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(
            issuer.verify_at("", issued_at()),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_debug_hides_keys() {
        let output = format!("{:?}", issuer());
        assert!(output.contains("TokenIssuer"));
        assert!(!output.contains(SECRET));
    }
}
