//! Personal details collected at registration.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Letters in the Unicode sense: general category `L` only.
static LETTERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}+$").expect("Invalid regex"));

/// Errors from [`PersonName`] and [`Phone`] validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PersonError {
    /// Name length (in characters) outside the allowed range.
    #[error("{field} must be between {min} and {max} characters")]
    Length {
        /// Name of the offending field.
        field: &'static str,
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: usize,
    },
    /// Name contains something other than letters.
    #[error("{field} must contain only letters")]
    NotLetters {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Phone number is not exactly eleven digits.
    #[error("phone must be exactly {} digits", Phone::DIGITS)]
    Phone,
}

/// A first or last name: 1-50 letters in any script, nothing else.
///
/// Letter-numbers such as `Ⅻ` and combining marks are not letters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Minimum length in characters.
    pub const MIN_LENGTH: usize = 1;
    /// Maximum length in characters.
    pub const MAX_LENGTH: usize = 50;

    /// Parse a name, reporting errors against `field`.
    ///
    /// Length is counted in characters, not bytes, so `"Пётр"` is four long.
    ///
    /// # Errors
    ///
    /// Returns [`PersonError::Length`] or [`PersonError::NotLetters`].
    pub fn parse(field: &'static str, value: &str) -> Result<Self, PersonError> {
        let len = value.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&len) {
            return Err(PersonError::Length {
                field,
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }
        if !LETTERS_RE.is_match(value) {
            return Err(PersonError::NotLetters { field });
        }
        Ok(Self(value.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A phone number stored as exactly eleven ASCII digits (e.g. `79161234567`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Required number of digits.
    pub const DIGITS: usize = 11;

    /// Parse a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`PersonError::Phone`] unless the input is exactly eleven digits.
    pub fn parse(value: &str) -> Result<Self, PersonError> {
        if value.len() != Self::DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PersonError::Phone);
        }
        Ok(Self(value.to_owned()))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_name_accepts_any_script() {
        assert!(PersonName::parse("first_name", "Anna").is_ok());
        assert!(PersonName::parse("first_name", "Пётр").is_ok());
        assert!(PersonName::parse("last_name", "Müller").is_ok());
    }

    #[test]
    fn test_name_length_counts_chars() {
        let fifty = "Ж".repeat(50);
        assert!(PersonName::parse("last_name", &fifty).is_ok());

        let err = PersonName::parse("last_name", &"a".repeat(51)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "last_name must be between 1 and 50 characters"
        );
        assert!(PersonName::parse("last_name", "").is_err());
    }

    #[test]
    fn test_name_rejects_non_letters() {
        let err = PersonName::parse("first_name", "Anna-Maria").unwrap_err();
        assert_eq!(err.to_string(), "first_name must contain only letters");
        assert!(PersonName::parse("first_name", "R2D2").is_err());
        assert!(PersonName::parse("first_name", "Jo Ann").is_err());
    }

    #[test]
    fn test_name_rejects_letter_numbers_and_marks() {
        // Roman numeral twelve is a letter-number, not a letter.
        assert!(PersonName::parse("first_name", "Ⅻ").is_err());
        // Decomposed "é": the combining acute is a mark.
        assert!(PersonName::parse("first_name", "Rene\u{301}").is_err());
        assert!(PersonName::parse("first_name", "Ren\u{e9}").is_ok());
    }

    #[test]
    fn test_phone_requires_eleven_digits() {
        assert!(Phone::parse("79161234567").is_ok());
        assert_eq!(Phone::parse("7916123456"), Err(PersonError::Phone));
        assert_eq!(Phone::parse("791612345678"), Err(PersonError::Phone));
        assert_eq!(Phone::parse("+7916123456"), Err(PersonError::Phone));
        assert_eq!(
            PersonError::Phone.to_string(),
            "phone must be exactly 11 digits"
        );
    }
}
