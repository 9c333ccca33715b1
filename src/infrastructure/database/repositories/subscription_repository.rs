//! SeaORM implementation of SubscriptionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::parse_column;
use crate::domain::subscription::{SubscriptionRepository, SubscriptionStatus, UserSubscription};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::user_subscription;

fn entity_to_domain(m: user_subscription::Model) -> DomainResult<UserSubscription> {
    Ok(UserSubscription {
        id: m.id,
        user_id: m.user_id,
        plan_id: m.plan_id,
        billing_cycle: parse_column(&m.billing_cycle, "billing_cycle")?,
        status: parse_column(&m.status, "status")?,
        start_date: m.start_date,
        end_date: m.end_date,
        next_billing_date: m.next_billing_date,
        amount: m.amount,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(s: UserSubscription) -> user_subscription::ActiveModel {
    user_subscription::ActiveModel {
        id: Set(s.id),
        user_id: Set(s.user_id),
        plan_id: Set(s.plan_id),
        billing_cycle: Set(s.billing_cycle.as_str().to_string()),
        status: Set(s.status.as_str().to_string()),
        start_date: Set(s.start_date),
        end_date: Set(s.end_date),
        next_billing_date: Set(s.next_billing_date),
        amount: Set(s.amount),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

pub struct SeaOrmSubscriptionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list(
        &self,
        query: sea_orm::Select<user_subscription::Entity>,
    ) -> DomainResult<Vec<UserSubscription>> {
        query
            .order_by_asc(user_subscription::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(entity_to_domain)
            .collect()
    }
}

#[async_trait]
impl SubscriptionRepository for SeaOrmSubscriptionRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<UserSubscription>> {
        user_subscription::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(entity_to_domain)
            .transpose()
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<UserSubscription>> {
        self.list(
            user_subscription::Entity::find()
                .filter(user_subscription::Column::UserId.eq(user_id)),
        )
        .await
    }

    async fn find_active_by_user(&self, user_id: i32) -> DomainResult<Vec<UserSubscription>> {
        self.list(
            user_subscription::Entity::find()
                .filter(user_subscription::Column::UserId.eq(user_id))
                .filter(user_subscription::Column::Status.eq(SubscriptionStatus::Active.as_str())),
        )
        .await
    }

    async fn find_due(&self, now: DateTime<Utc>) -> DomainResult<Vec<UserSubscription>> {
        self.list(
            user_subscription::Entity::find()
                .filter(user_subscription::Column::Status.eq(SubscriptionStatus::Active.as_str()))
                .filter(user_subscription::Column::NextBillingDate.lte(now)),
        )
        .await
    }

    async fn save(&self, subscription: UserSubscription) -> DomainResult<UserSubscription> {
        let mut model = domain_to_active(subscription);
        model.id = NotSet;
        let result = model.insert(&self.db).await?;
        entity_to_domain(result)
    }

    async fn update(&self, subscription: UserSubscription) -> DomainResult<()> {
        if user_subscription::Entity::find_by_id(subscription.id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Subscription", "id", subscription.id));
        }
        domain_to_active(subscription).update(&self.db).await?;
        Ok(())
    }
}
