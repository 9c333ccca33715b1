//! Payment transaction repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{PaymentStatus, PaymentTransaction};
use crate::domain::bill::Bill;
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_id(&self, transaction_id: &str) -> DomainResult<Option<PaymentTransaction>>;
    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<PaymentTransaction>>;
    async fn find_by_bill(&self, bill_id: i32) -> DomainResult<Vec<PaymentTransaction>>;
    async fn find_by_status(&self, status: PaymentStatus) -> DomainResult<Vec<PaymentTransaction>>;

    /// Failed transactions whose scheduled retry is due and whose retry
    /// count is below `max_retries`.
    async fn find_due_retries(
        &self,
        now: DateTime<Utc>,
        max_retries: i32,
    ) -> DomainResult<Vec<PaymentTransaction>>;

    async fn save(&self, transaction: PaymentTransaction) -> DomainResult<()>;

    /// Move a FAILED transaction to CANCELLED and drop its scheduled retry,
    /// as one conditional write. Returns `false` when the transaction was
    /// not FAILED, i.e. another caller already claimed it.
    async fn claim_for_retry(
        &self,
        transaction_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<bool>;

    /// Insert `transaction` and write `bill` as one unit. Fails with
    /// `Conflict` and writes nothing when the stored bill is already PAID.
    async fn record(&self, transaction: PaymentTransaction, bill: Bill) -> DomainResult<()>;
}
