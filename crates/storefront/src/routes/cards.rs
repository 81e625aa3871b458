//! Saved payment cards. Every route requires a token and only ever touches
//! the caller's own cards.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use playbox_core::{CardError, CardExpiry, CardId, CardNumber};

use crate::db::RepositoryError;
use crate::db::cards::CardRepository;
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::AuthUser;
use crate::models::card::{NewCard, PaymentCard};
use crate::state::AppState;

/// Body of `POST /cards`.
#[derive(Debug, Deserialize)]
pub struct CardRequest {
    pub cardholder_name: String,
    pub card_number: String,
    pub exp_month: i32,
    pub exp_year: i32,
}

impl TryFrom<CardRequest> for NewCard {
    type Error = CardError;

    fn try_from(request: CardRequest) -> std::result::Result<Self, Self::Error> {
        let card_number = CardNumber::parse(&request.card_number)?;
        if request.cardholder_name.trim().is_empty() {
            return Err(CardError::EmptyCardholder);
        }
        let expiry = CardExpiry::new(request.exp_month, request.exp_year)?;

        Ok(Self {
            cardholder_name: request.cardholder_name,
            card_number,
            expiry,
        })
    }
}

/// List the caller's cards.
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn index(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<PaymentCard>>> {
    let cards = CardRepository::new(state.pool()).list(user.user_id).await?;
    Ok(Json(cards))
}

/// Save a card. 201 with the stored card.
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CardRequest>,
) -> Result<(StatusCode, Json<PaymentCard>)> {
    let card = NewCard::try_from(request)?;
    let card = CardRepository::new(state.pool())
        .create(user.user_id, &card)
        .await?;

    tracing::info!(card_id = %card.card_id, "Card saved");
    Ok((StatusCode::CREATED, Json(card)))
}

/// Delete one of the caller's cards. Someone else's card is a 404.
#[instrument(skip_all, fields(user_id = %user.user_id, card_id = %id))]
pub async fn destroy(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<CardId>,
) -> Result<StatusCode> {
    CardRepository::new(state.pool())
        .delete(user.user_id, id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Card not found".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> CardRequest {
        CardRequest {
            cardholder_name: "ANNA PETROVA".to_string(),
            card_number: "4111 1111 1111 1111".to_string(),
            exp_month: 9,
            exp_year: 28,
        }
    }

    #[test]
    fn test_valid_card() {
        let card = NewCard::try_from(request()).unwrap();
        assert_eq!(card.card_number.as_str(), "4111 1111 1111 1111");
        assert_eq!(card.expiry.month(), 9);
        assert_eq!(card.expiry.year(), 28);
    }

    #[test]
    fn test_blank_cardholder_rejected() {
        let mut r = request();
        r.cardholder_name = "   ".to_string();
        assert_eq!(NewCard::try_from(r).unwrap_err(), CardError::EmptyCardholder);
    }

    #[test]
    fn test_number_checked_first() {
        let mut r = request();
        r.card_number = "4111-1111-1111-1111".to_string();
        r.exp_month = 13;
        assert_eq!(NewCard::try_from(r).unwrap_err(), CardError::NumberFormat);
    }

    #[test]
    fn test_expiry_rejected() {
        let mut r = request();
        r.exp_year = 2028;
        assert_eq!(NewCard::try_from(r).unwrap_err(), CardError::Year);
    }
}
