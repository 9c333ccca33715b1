//! Product domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::shared::errors::DomainError;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub unit_price: Decimal,
    /// Units on hand
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Decimal,
        stock_quantity: i32,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::Validation("Product name is required".into()));
        }
        if unit_price.is_sign_negative() {
            return Err(DomainError::Validation("Unit price must not be negative".into()));
        }
        Self::check_stock(stock_quantity)?;

        let now = Utc::now();
        Ok(Self {
            id: 0,
            name,
            category: category.into(),
            unit_price,
            stock_quantity,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn set_stock(&mut self, quantity: i32) -> Result<(), DomainError> {
        Self::check_stock(quantity)?;
        self.stock_quantity = quantity;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn check_stock(quantity: i32) -> Result<(), DomainError> {
        if quantity < 0 {
            return Err(DomainError::Validation("Stock quantity must not be negative".into()));
        }
        Ok(())
    }
}
