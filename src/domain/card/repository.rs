//! Card repository interface

use async_trait::async_trait;

use super::model::CardDetail;
use crate::domain::DomainResult;

#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<CardDetail>>;
    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<CardDetail>>;
    async fn find_all(&self) -> DomainResult<Vec<CardDetail>>;
    async fn save(&self, card: CardDetail) -> DomainResult<CardDetail>;
    async fn update(&self, card: CardDetail) -> DomainResult<()>;

    /// Unset `is_default` on every card of `user_id` except `keep_id`
    async fn clear_default_for_user(&self, user_id: i32, keep_id: i32) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
