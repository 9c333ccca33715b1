//! SeaORM implementation of PlanRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use super::parse_column;
use crate::domain::plan::{PlanRepository, PlanType, SubscriptionPlan};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::subscription_plan;

fn entity_to_domain(m: subscription_plan::Model) -> DomainResult<SubscriptionPlan> {
    Ok(SubscriptionPlan {
        id: m.id,
        name: m.name,
        description: m.description,
        monthly_price: m.monthly_price,
        yearly_price: m.yearly_price,
        features: m.features,
        active: m.active,
        is_default: m.is_default,
        plan_type: parse_column(&m.plan_type, "plan_type")?,
        discount_percentage: m.discount_percentage,
        offer_valid_until: m.offer_valid_until,
        max_users: m.max_users,
        max_bills_per_month: m.max_bills_per_month,
        priority_support: m.priority_support,
        custom_branding: m.custom_branding,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn to_domain_vec(models: Vec<subscription_plan::Model>) -> DomainResult<Vec<SubscriptionPlan>> {
    models.into_iter().map(entity_to_domain).collect()
}

fn domain_to_active(p: SubscriptionPlan) -> subscription_plan::ActiveModel {
    subscription_plan::ActiveModel {
        id: Set(p.id),
        name: Set(p.name),
        description: Set(p.description),
        monthly_price: Set(p.monthly_price),
        yearly_price: Set(p.yearly_price),
        features: Set(p.features),
        active: Set(p.active),
        is_default: Set(p.is_default),
        plan_type: Set(p.plan_type.as_str().to_string()),
        discount_percentage: Set(p.discount_percentage),
        offer_valid_until: Set(p.offer_valid_until),
        max_users: Set(p.max_users),
        max_bills_per_month: Set(p.max_bills_per_month),
        priority_support: Set(p.priority_support),
        custom_branding: Set(p.custom_branding),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

pub struct SeaOrmPlanRepository {
    db: DatabaseConnection,
}

impl SeaOrmPlanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanRepository for SeaOrmPlanRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<SubscriptionPlan>> {
        subscription_plan::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(entity_to_domain)
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<SubscriptionPlan>> {
        subscription_plan::Entity::find()
            .filter(subscription_plan::Column::Name.eq(name))
            .one(&self.db)
            .await?
            .map(entity_to_domain)
            .transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<SubscriptionPlan>> {
        let models = subscription_plan::Entity::find()
            .order_by_asc(subscription_plan::Column::Id)
            .all(&self.db)
            .await?;
        to_domain_vec(models)
    }

    async fn find_active(&self) -> DomainResult<Vec<SubscriptionPlan>> {
        let models = subscription_plan::Entity::find()
            .filter(subscription_plan::Column::Active.eq(true))
            .order_by_asc(subscription_plan::Column::Id)
            .all(&self.db)
            .await?;
        to_domain_vec(models)
    }

    async fn find_by_type(&self, plan_type: PlanType) -> DomainResult<Vec<SubscriptionPlan>> {
        let models = subscription_plan::Entity::find()
            .filter(subscription_plan::Column::PlanType.eq(plan_type.as_str()))
            .order_by_asc(subscription_plan::Column::Id)
            .all(&self.db)
            .await?;
        to_domain_vec(models)
    }

    async fn save(&self, plan: SubscriptionPlan) -> DomainResult<SubscriptionPlan> {
        let mut model = domain_to_active(plan);
        model.id = NotSet;
        let result = model.insert(&self.db).await?;
        info!(plan_id = result.id, name = result.name.as_str(), "Plan saved");
        entity_to_domain(result)
    }

    async fn update(&self, plan: SubscriptionPlan) -> DomainResult<SubscriptionPlan> {
        if subscription_plan::Entity::find_by_id(plan.id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Plan", "id", plan.id));
        }

        let mut model = domain_to_active(plan);
        model.updated_at = Set(Utc::now());
        let result = model.update(&self.db).await?;
        entity_to_domain(result)
    }
}
