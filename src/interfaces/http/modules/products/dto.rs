//! Product DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Product;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub category: String,
    #[schema(value_type = String, example = "999.99")]
    pub unit_price: Decimal,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            category: p.category,
            unit_price: p.unit_price,
            stock_quantity: p.stock_quantity,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1–200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "category must be 1–100 characters"))]
    pub category: String,
    #[schema(value_type = String, example = "999.99")]
    pub unit_price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0, message = "stock_quantity must not be negative"))]
    pub stock_quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStockRequest {
    #[validate(range(min = 0, message = "stock_quantity must not be negative"))]
    pub stock_quantity: i32,
}
