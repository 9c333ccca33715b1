//! Card domain entity
//!
//! Only the last four digits of a card number are ever kept.

use chrono::{DateTime, Utc};

use crate::shared::errors::DomainError;
use crate::shared::validations::card_last4;

#[derive(Debug, Clone)]
pub struct CardDetail {
    pub id: i32,
    pub user_id: i32,
    pub card_number_last4: String,
    pub card_holder_name: String,
    /// Network name such as `VISA`, free text
    pub card_type: Option<String>,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCard {
    pub user_id: i32,
    pub card_number: String,
    pub card_holder_name: String,
    pub card_type: Option<String>,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub is_default: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    pub card_holder_name: Option<String>,
    pub card_type: Option<String>,
    pub expiry_month: Option<i32>,
    pub expiry_year: Option<i32>,
    pub is_default: Option<bool>,
}

fn check_expiry_month(month: i32) -> Result<(), DomainError> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::Validation(
            "Expiry month must be between 1 and 12".into(),
        ));
    }
    Ok(())
}

impl CardDetail {
    pub fn from_new(input: NewCard) -> Result<Self, DomainError> {
        let last4 = card_last4(&input.card_number).ok_or_else(|| {
            DomainError::Validation("Card number must contain 13 to 19 digits".into())
        })?;
        check_expiry_month(input.expiry_month)?;
        if input.card_holder_name.trim().is_empty() {
            return Err(DomainError::Validation("Card holder name is required".into()));
        }

        let now = Utc::now();
        Ok(Self {
            id: 0,
            user_id: input.user_id,
            card_number_last4: last4,
            card_holder_name: input.card_holder_name,
            card_type: input.card_type,
            expiry_month: input.expiry_month,
            expiry_year: input.expiry_year,
            is_default: input.is_default,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, update: CardUpdate) -> Result<(), DomainError> {
        if let Some(month) = update.expiry_month {
            check_expiry_month(month)?;
            self.expiry_month = month;
        }
        if let Some(year) = update.expiry_year {
            self.expiry_year = year;
        }
        if let Some(name) = update.card_holder_name {
            self.card_holder_name = name;
        }
        if update.card_type.is_some() {
            self.card_type = update.card_type;
        }
        if let Some(is_default) = update.is_default {
            self.is_default = is_default;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewCard {
        NewCard {
            user_id: 3,
            card_number: "4111 1111 1111 1234".into(),
            card_holder_name: "Alice Smith".into(),
            card_type: Some("VISA".into()),
            expiry_month: 8,
            expiry_year: 2029,
            is_default: true,
        }
    }

    #[test]
    fn keeps_only_last_four() {
        let card = CardDetail::from_new(input()).unwrap();
        assert_eq!(card.card_number_last4, "1234");
    }

    #[test]
    fn rejects_short_numbers_and_bad_month() {
        let mut bad = input();
        bad.card_number = "1234".into();
        assert!(CardDetail::from_new(bad).is_err());

        let mut bad = input();
        bad.expiry_month = 13;
        assert!(CardDetail::from_new(bad).is_err());
    }

    #[test]
    fn apply_updates_selected_fields() {
        let mut card = CardDetail::from_new(input()).unwrap();
        card.apply(CardUpdate {
            expiry_year: Some(2031),
            is_default: Some(false),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(card.expiry_year, 2031);
        assert!(!card.is_default);
        assert_eq!(card.card_holder_name, "Alice Smith");

        assert!(card
            .apply(CardUpdate { expiry_month: Some(0), ..Default::default() })
            .is_err());
    }
}
