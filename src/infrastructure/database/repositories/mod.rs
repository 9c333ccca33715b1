//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod bill_repository;
pub mod card_repository;
pub mod payment_repository;
pub mod plan_repository;
pub mod product_repository;
pub mod repository_provider;
pub mod sale_repository;
pub mod subscription_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use std::str::FromStr;

use crate::domain::{DomainError, DomainResult};

/// Parse an enum stored as text, reporting bad rows as storage errors.
pub(crate) fn parse_column<T>(value: &str, column: &'static str) -> DomainResult<T>
where
    T: FromStr<Err = DomainError>,
{
    value.parse().map_err(|_| {
        DomainError::Storage(format!("Invalid {} value in database: {}", column, value))
    })
}
