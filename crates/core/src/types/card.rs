//! Payment card value types.
//!
//! Card numbers are stored as entered (`dddd dddd dddd dddd`); no Luhn check
//! and no masking is applied here.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors from payment card validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    /// Card number is not four space-separated groups of four digits.
    #[error("card_number must be '0000 0000 0000 0000'")]
    NumberFormat,
    /// Cardholder name is empty.
    #[error("cardholder_name cannot be empty")]
    EmptyCardholder,
    /// Month outside 1-12.
    #[error("exp_month must be between 1 and 12")]
    Month,
    /// Year outside 0-99.
    #[error("exp_year must be two digits")]
    Year,
}

/// A card number in `dddd dddd dddd dddd` form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CardNumber(String);

impl CardNumber {
    /// Parse a card number.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::NumberFormat`] if the layout does not match.
    pub fn parse(value: &str) -> Result<Self, CardError> {
        let mut groups = 0;
        for group in value.split(' ') {
            if group.len() != 4 || !group.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CardError::NumberFormat);
            }
            groups += 1;
        }
        if groups != 4 {
            return Err(CardError::NumberFormat);
        }
        Ok(Self(value.to_owned()))
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card expiry as a month (1-12) and a two-digit year (0-99).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardExpiry {
    month: i16,
    year: i16,
}

impl CardExpiry {
    /// Validate an expiry month and two-digit year.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Month`] or [`CardError::Year`].
    pub fn new(month: i32, year: i32) -> Result<Self, CardError> {
        let month = i16::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or(CardError::Month)?;
        let year = i16::try_from(year)
            .ok()
            .filter(|y| (0..=99).contains(y))
            .ok_or(CardError::Year)?;
        Ok(Self { month, year })
    }

    /// Expiry month, 1-12.
    #[must_use]
    pub const fn month(&self) -> i16 {
        self.month
    }

    /// Two-digit expiry year.
    #[must_use]
    pub const fn year(&self) -> i16 {
        self.year
    }
}
