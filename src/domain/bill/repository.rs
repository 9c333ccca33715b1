//! Bill repository interface

use async_trait::async_trait;

use super::model::{Bill, BillStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait BillRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Bill>>;
    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Bill>>;
    async fn find_by_status(&self, status: BillStatus) -> DomainResult<Vec<Bill>>;
    /// Save a new bill, returning it with its assigned ID
    async fn save(&self, bill: Bill) -> DomainResult<Bill>;
    async fn update(&self, bill: Bill) -> DomainResult<()>;
}
