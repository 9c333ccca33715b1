//! User subscription repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::UserSubscription;
use crate::domain::DomainResult;

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<UserSubscription>>;
    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<UserSubscription>>;
    async fn find_active_by_user(&self, user_id: i32) -> DomainResult<Vec<UserSubscription>>;
    /// Active subscriptions whose next billing date is at or before `now`.
    async fn find_due(&self, now: DateTime<Utc>) -> DomainResult<Vec<UserSubscription>>;
    async fn save(&self, subscription: UserSubscription) -> DomainResult<UserSubscription>;
    async fn update(&self, subscription: UserSubscription) -> DomainResult<()>;
}
