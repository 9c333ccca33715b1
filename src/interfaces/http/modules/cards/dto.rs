//! Card DTOs
//!
//! The full card number is accepted on create and never returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::card::{CardUpdate, NewCard};
use crate::domain::CardDetail;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CardDto {
    pub id: i32,
    pub user_id: i32,
    pub card_number_last4: String,
    pub card_holder_name: String,
    pub card_type: Option<String>,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CardDetail> for CardDto {
    fn from(c: CardDetail) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            card_number_last4: c.card_number_last4,
            card_holder_name: c.card_holder_name,
            card_type: c.card_type,
            expiry_month: c.expiry_month,
            expiry_year: c.expiry_year,
            is_default: c.is_default,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCardRequest {
    pub user_id: i32,
    #[validate(length(min = 13, max = 23, message = "card_number looks too short or too long"))]
    pub card_number: String,
    #[validate(length(min = 1, max = 100, message = "card_holder_name is required"))]
    pub card_holder_name: String,
    pub card_type: Option<String>,
    #[validate(range(min = 1, max = 12, message = "expiry_month must be 1–12"))]
    pub expiry_month: i32,
    #[validate(range(min = 2000, max = 2100, message = "expiry_year is out of range"))]
    pub expiry_year: i32,
    #[serde(default)]
    pub is_default: bool,
}

impl From<CreateCardRequest> for NewCard {
    fn from(r: CreateCardRequest) -> Self {
        Self {
            user_id: r.user_id,
            card_number: r.card_number,
            card_holder_name: r.card_holder_name,
            card_type: r.card_type,
            expiry_month: r.expiry_month,
            expiry_year: r.expiry_year,
            is_default: r.is_default,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCardRequest {
    #[validate(length(min = 1, max = 100, message = "card_holder_name must not be empty"))]
    pub card_holder_name: Option<String>,
    pub card_type: Option<String>,
    #[validate(range(min = 1, max = 12, message = "expiry_month must be 1–12"))]
    pub expiry_month: Option<i32>,
    pub expiry_year: Option<i32>,
    pub is_default: Option<bool>,
}

impl From<UpdateCardRequest> for CardUpdate {
    fn from(r: UpdateCardRequest) -> Self {
        Self {
            card_holder_name: r.card_holder_name,
            card_type: r.card_type,
            expiry_month: r.expiry_month,
            expiry_year: r.expiry_year,
            is_default: r.is_default,
        }
    }
}
