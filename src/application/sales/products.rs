//! Product catalog service

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{DomainError, DomainResult, Product, RepositoryProvider};

pub struct ProductService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ProductService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Product>> {
        self.repos.products().find_all().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Product> {
        self.repos
            .products()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", "id", id))
    }

    pub async fn create(
        &self,
        name: &str,
        category: &str,
        unit_price: Decimal,
        stock_quantity: i32,
    ) -> DomainResult<Product> {
        let product = Product::new(name, category, unit_price, stock_quantity)?;
        let product = self.repos.products().save(product).await?;
        info!(product_id = product.id, name, stock_quantity, "Product created");
        Ok(product)
    }

    pub async fn set_stock(&self, id: i32, quantity: i32) -> DomainResult<Product> {
        let mut product = self.get(id).await?;
        let previous = product.stock_quantity;
        product.set_stock(quantity)?;
        self.repos.products().update(product.clone()).await?;
        info!(product_id = id, previous, quantity, "Stock level updated");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::billing::testing::repos;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn stock_updates_are_validated() {
        let repos = repos();
        let service = ProductService::new(repos.clone());
        let product = service.create("Monitor", "Electronics", dec!(199), 4).await.unwrap();

        let updated = service.set_stock(product.id, 12).await.unwrap();
        assert_eq!(updated.stock_quantity, 12);
        assert!(service.set_stock(product.id, -3).await.is_err());

        let levels = repos.products().stock_levels().await.unwrap();
        assert_eq!(levels.get(&product.id), Some(&12));
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let service = ProductService::new(repos());
        assert!(matches!(service.get(1).await.unwrap_err(), DomainError::NotFound { .. }));
    }
}
