//! Subscription plan repository interface

use async_trait::async_trait;

use super::model::{PlanType, SubscriptionPlan};
use crate::domain::DomainResult;

#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<SubscriptionPlan>>;
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<SubscriptionPlan>>;
    async fn find_all(&self) -> DomainResult<Vec<SubscriptionPlan>>;
    async fn find_active(&self) -> DomainResult<Vec<SubscriptionPlan>>;
    async fn find_by_type(&self, plan_type: PlanType) -> DomainResult<Vec<SubscriptionPlan>>;
    async fn save(&self, plan: SubscriptionPlan) -> DomainResult<SubscriptionPlan>;
    async fn update(&self, plan: SubscriptionPlan) -> DomainResult<SubscriptionPlan>;
}
