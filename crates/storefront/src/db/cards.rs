//! Payment card repository.

use sqlx::{FromRow, PgPool, Row, postgres::PgRow};

use playbox_core::{CardId, UserId};

use super::RepositoryError;
use crate::models::card::{NewCard, PaymentCard};

impl<'r> FromRow<'r, PgRow> for PaymentCard {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            card_id: row.try_get("card_id")?,
            user_id: row.try_get("user_id")?,
            cardholder_name: row.try_get("cardholder_name")?,
            card_number: row.try_get("card_number")?,
            exp_month: row.try_get("exp_month")?,
            exp_year: row.try_get("exp_year")?,
        })
    }
}

/// Repository for a user's saved cards. Every query is scoped to the owner.
pub struct CardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CardRepository<'a> {
    /// Create a new card repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's cards, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<PaymentCard>, RepositoryError> {
        let cards = sqlx::query_as::<_, PaymentCard>(
            r"
            SELECT card_id, user_id, cardholder_name, card_number, exp_month, exp_year
            FROM payment_cards
            WHERE user_id = $1
            ORDER BY card_id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(cards)
    }

    /// Save a card for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        card: &NewCard,
    ) -> Result<PaymentCard, RepositoryError> {
        let card = sqlx::query_as::<_, PaymentCard>(
            r"
            INSERT INTO payment_cards (user_id, cardholder_name, card_number, exp_month, exp_year)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING card_id, user_id, cardholder_name, card_number, exp_month, exp_year
            ",
        )
        .bind(user_id)
        .bind(&card.cardholder_name)
        .bind(card.card_number.as_str())
        .bind(card.expiry.month())
        .bind(card.expiry.year())
        .fetch_one(self.pool)
        .await?;

        Ok(card)
    }

    /// Delete one of a user's cards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the card does not exist or
    /// belongs to another user.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, user_id: UserId, card_id: CardId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM payment_cards WHERE card_id = $1 AND user_id = $2")
            .bind(card_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
