//! SeaORM implementation of ProductRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};

use crate::domain::product::{Product, ProductRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::product;

fn entity_to_domain(m: product::Model) -> Product {
    Product {
        id: m.id,
        name: m.name,
        category: m.category,
        unit_price: m.unit_price,
        stock_quantity: m.stock_quantity,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(p: Product) -> product::ActiveModel {
    product::ActiveModel {
        id: Set(p.id),
        name: Set(p.name),
        category: Set(p.category),
        unit_price: Set(p.unit_price),
        stock_quantity: Set(p.stock_quantity),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Product>> {
        let model = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        let models = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, p: Product) -> DomainResult<Product> {
        let mut model = domain_to_active(p);
        model.id = NotSet;
        Ok(entity_to_domain(model.insert(&self.db).await?))
    }

    async fn update(&self, p: Product) -> DomainResult<()> {
        if product::Entity::find_by_id(p.id).one(&self.db).await?.is_none() {
            return Err(DomainError::not_found("Product", "id", p.id));
        }
        domain_to_active(p).update(&self.db).await?;
        Ok(())
    }
}
