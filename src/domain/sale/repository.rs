//! Sale repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::Sale;
use crate::domain::DomainResult;

#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// All sales, oldest first
    async fn find_all(&self) -> DomainResult<Vec<Sale>>;

    /// Sales with `start <= sale_date <= end`, oldest first
    async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Sale>>;

    async fn find_by_region(&self, region: &str) -> DomainResult<Vec<Sale>>;

    /// Newest-first page of the ledger
    async fn find_page(&self, offset: u64, limit: u64) -> DomainResult<Vec<Sale>>;

    async fn count(&self) -> DomainResult<u64>;

    async fn save(&self, sale: Sale) -> DomainResult<Sale>;
}
