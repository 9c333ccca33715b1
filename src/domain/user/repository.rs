//! User repository interface

use async_trait::async_trait;

use super::model::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn find_all(&self) -> DomainResult<Vec<User>>;
    async fn count_admins(&self) -> DomainResult<u64>;
    /// Insert a new user; the returned value carries the assigned id.
    async fn save(&self, user: User) -> DomainResult<User>;
}
