//! Product repository interface

use std::collections::HashMap;

use async_trait::async_trait;

use super::model::Product;
use crate::domain::DomainResult;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Product>>;
    async fn find_all(&self) -> DomainResult<Vec<Product>>;
    async fn save(&self, product: Product) -> DomainResult<Product>;
    async fn update(&self, product: Product) -> DomainResult<()>;

    /// Stock on hand keyed by product ID
    async fn stock_levels(&self) -> DomainResult<HashMap<i32, i32>> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .map(|p| (p.id, p.stock_quantity))
            .collect())
    }
}
