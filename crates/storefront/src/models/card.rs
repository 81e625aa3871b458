//! Payment card types.

use serde::Serialize;

use playbox_core::{CardExpiry, CardId, CardNumber, UserId};

/// A card saved by a user.
///
/// Numbers are stored and returned as entered.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentCard {
    pub card_id: CardId,
    pub user_id: UserId,
    pub cardholder_name: String,
    pub card_number: String,
    pub exp_month: i16,
    pub exp_year: i16,
}

/// A validated card, ready to insert.
#[derive(Debug, Clone)]
pub struct NewCard {
    pub cardholder_name: String,
    pub card_number: CardNumber,
    pub expiry: CardExpiry,
}
