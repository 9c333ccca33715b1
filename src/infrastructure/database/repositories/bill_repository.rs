//! SeaORM implementation of BillRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::parse_column;
use crate::domain::bill::{Bill, BillRepository, BillStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::bill;

fn entity_to_domain(m: bill::Model) -> DomainResult<Bill> {
    Ok(Bill {
        id: m.id,
        user_id: m.user_id,
        subscription_id: m.subscription_id,
        bill_number: m.bill_number,
        amount: m.amount,
        status: parse_column(&m.status, "bill status")?,
        billing_period_start: m.billing_period_start,
        billing_period_end: m.billing_period_end,
        due_date: m.due_date,
        paid_date: m.paid_date,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

pub(super) fn domain_to_active(b: Bill) -> bill::ActiveModel {
    bill::ActiveModel {
        id: Set(b.id),
        user_id: Set(b.user_id),
        subscription_id: Set(b.subscription_id),
        bill_number: Set(b.bill_number),
        amount: Set(b.amount),
        status: Set(b.status.as_str().to_string()),
        billing_period_start: Set(b.billing_period_start),
        billing_period_end: Set(b.billing_period_end),
        due_date: Set(b.due_date),
        paid_date: Set(b.paid_date),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
    }
}

pub struct SeaOrmBillRepository {
    db: DatabaseConnection,
}

impl SeaOrmBillRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BillRepository for SeaOrmBillRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Bill>> {
        bill::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(entity_to_domain)
            .transpose()
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Bill>> {
        bill::Entity::find()
            .filter(bill::Column::UserId.eq(user_id))
            .order_by_asc(bill::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(entity_to_domain)
            .collect()
    }

    async fn find_by_status(&self, status: BillStatus) -> DomainResult<Vec<Bill>> {
        bill::Entity::find()
            .filter(bill::Column::Status.eq(status.as_str()))
            .order_by_asc(bill::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(entity_to_domain)
            .collect()
    }

    async fn save(&self, b: Bill) -> DomainResult<Bill> {
        let mut model = domain_to_active(b);
        model.id = NotSet;
        let result = model.insert(&self.db).await?;
        entity_to_domain(result)
    }

    async fn update(&self, b: Bill) -> DomainResult<()> {
        if bill::Entity::find_by_id(b.id).one(&self.db).await?.is_none() {
            return Err(DomainError::not_found("Bill", "id", b.id));
        }
        domain_to_active(b).update(&self.db).await?;
        Ok(())
    }
}
