//! SeaORM implementation of SaleRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::sale::{Sale, SaleRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::sale;

fn entity_to_domain(m: sale::Model) -> Sale {
    Sale {
        id: m.id,
        product_id: m.product_id,
        product_name: m.product_name,
        category: m.category,
        quantity: m.quantity,
        unit_price: m.unit_price,
        total_price: m.total_price,
        customer_id: m.customer_id,
        customer_name: m.customer_name,
        is_premium_customer: m.is_premium_customer,
        discount_applied: m.discount_applied,
        final_amount: m.final_amount,
        payment_method: m.payment_method,
        sale_date: m.sale_date,
        region: m.region,
        salesperson: m.salesperson,
        notes: m.notes,
    }
}

pub struct SeaOrmSaleRepository {
    db: DatabaseConnection,
}

impl SeaOrmSaleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run `query` oldest first
    async fn chronological(&self, query: sea_orm::Select<sale::Entity>) -> DomainResult<Vec<Sale>> {
        let models = query
            .order_by_asc(sale::Column::SaleDate)
            .order_by_asc(sale::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }
}

#[async_trait]
impl SaleRepository for SeaOrmSaleRepository {
    async fn find_all(&self) -> DomainResult<Vec<Sale>> {
        self.chronological(sale::Entity::find()).await
    }

    async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Sale>> {
        self.chronological(
            sale::Entity::find().filter(sale::Column::SaleDate.between(start, end)),
        )
        .await
    }

    async fn find_by_region(&self, region: &str) -> DomainResult<Vec<Sale>> {
        self.chronological(sale::Entity::find().filter(sale::Column::Region.eq(region)))
            .await
    }

    async fn find_page(&self, offset: u64, limit: u64) -> DomainResult<Vec<Sale>> {
        let models = sale::Entity::find()
            .order_by_desc(sale::Column::SaleDate)
            .order_by_desc(sale::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(sale::Entity::find().count(&self.db).await?)
    }

    async fn save(&self, s: Sale) -> DomainResult<Sale> {
        let model = sale::ActiveModel {
            id: NotSet,
            product_id: Set(s.product_id),
            product_name: Set(s.product_name),
            category: Set(s.category),
            quantity: Set(s.quantity),
            unit_price: Set(s.unit_price),
            total_price: Set(s.total_price),
            customer_id: Set(s.customer_id),
            customer_name: Set(s.customer_name),
            is_premium_customer: Set(s.is_premium_customer),
            discount_applied: Set(s.discount_applied),
            final_amount: Set(s.final_amount),
            payment_method: Set(s.payment_method),
            sale_date: Set(s.sale_date),
            region: Set(s.region),
            salesperson: Set(s.salesperson),
            notes: Set(s.notes),
        };
        Ok(entity_to_domain(model.insert(&self.db).await?))
    }
}
