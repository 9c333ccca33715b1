//! Payment processing with scheduled retries

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::{BillingPolicy, ChargeOutcome, PaymentGateway};
use crate::domain::{
    Bill, DomainError, DomainResult, PaymentStatus, PaymentTransaction, RepositoryProvider,
};

/// Result of a charge attempt with the user-facing message
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub transaction: PaymentTransaction,
    pub message: String,
}

impl PaymentOutcome {
    pub fn succeeded(&self) -> bool {
        self.transaction.status == PaymentStatus::Success
    }
}

fn retry_label(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
    gateway: Arc<dyn PaymentGateway>,
    policy: BillingPolicy,
}

impl PaymentService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        gateway: Arc<dyn PaymentGateway>,
        policy: BillingPolicy,
    ) -> Self {
        Self {
            repos,
            gateway,
            policy,
        }
    }

    pub fn max_retries(&self) -> i32 {
        self.policy.max_payment_retries
    }

    /// Charge a bill for the first time.
    pub async fn initiate(
        &self,
        bill_id: i32,
        payment_method: &str,
    ) -> DomainResult<PaymentOutcome> {
        let mut bill = self.unpaid_bill(bill_id).await?;
        let now = Utc::now();
        let mut tx = PaymentTransaction::for_bill(&bill, payment_method, now);

        let message = match self.gateway.charge(&tx).await {
            ChargeOutcome::Approved => {
                tx.succeed(now);
                bill.mark_paid(now);
                "Payment processed successfully".to_string()
            }
            ChargeOutcome::Declined => {
                let retry_at = now + self.policy.retry_delay;
                tx.decline("Payment declined by provider", Some(retry_at), now);
                bill.mark_failed(now);
                format!("Payment failed. Scheduled for retry on {}", retry_label(retry_at))
            }
        };

        self.record(&tx, bill).await?;
        Ok(PaymentOutcome {
            transaction: tx,
            message,
        })
    }

    /// Charge again for a failed transaction. The attempt is a new transaction
    /// and the failed one is cancelled, so each failure is retried once.
    pub async fn retry(&self, transaction_id: &str) -> DomainResult<PaymentOutcome> {
        let previous = self
            .repos
            .payments()
            .find_by_id(transaction_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("Transaction", "transaction_id", transaction_id)
            })?;

        if !previous.is_failed() {
            return Err(DomainError::Validation(
                "Only failed transactions can be retried".into(),
            ));
        }
        if previous.retry_count >= self.policy.max_payment_retries {
            return Err(DomainError::Validation(format!(
                "Retry limit of {} reached for transaction {}",
                self.policy.max_payment_retries, transaction_id
            )));
        }

        let mut bill = self.unpaid_bill(previous.bill_id).await?;
        let now = Utc::now();

        // Claim before charging; a concurrent retry of the same attempt loses.
        if !self.repos.payments().claim_for_retry(transaction_id, now).await? {
            return Err(DomainError::Validation(
                "Only failed transactions can be retried".into(),
            ));
        }

        let mut tx = previous.retry(now);
        let message = match self.gateway.charge(&tx).await {
            ChargeOutcome::Approved => {
                tx.succeed(now);
                bill.mark_paid(now);
                "Payment retry successful".to_string()
            }
            ChargeOutcome::Declined if tx.retry_count < self.policy.max_payment_retries => {
                let retry_at = now + self.policy.retry_delay;
                tx.decline("Payment declined on retry", Some(retry_at), now);
                bill.mark_failed(now);
                format!(
                    "Payment retry failed. Scheduled for next retry on {}",
                    retry_label(retry_at)
                )
            }
            ChargeOutcome::Declined => {
                tx.decline("Payment declined on retry", None, now);
                bill.mark_failed(now);
                "Payment retry failed. Retry limit reached".to_string()
            }
        };

        self.record(&tx, bill).await?;
        Ok(PaymentOutcome {
            transaction: tx,
            message,
        })
    }

    pub async fn get(&self, transaction_id: &str) -> DomainResult<PaymentTransaction> {
        self.repos
            .payments()
            .find_by_id(transaction_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Transaction", "transaction_id", transaction_id))
    }

    pub async fn by_user(&self, user_id: i32) -> DomainResult<Vec<PaymentTransaction>> {
        self.repos.payments().find_by_user(user_id).await
    }

    pub async fn by_bill(&self, bill_id: i32) -> DomainResult<Vec<PaymentTransaction>> {
        self.repos.payments().find_by_bill(bill_id).await
    }

    /// Status name is matched case-insensitively.
    pub async fn by_status(&self, status: &str) -> DomainResult<Vec<PaymentTransaction>> {
        let status: PaymentStatus = status.parse()?;
        self.repos.payments().find_by_status(status).await
    }

    async fn unpaid_bill(&self, bill_id: i32) -> DomainResult<Bill> {
        let bill = self
            .repos
            .bills()
            .find_by_id(bill_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bill", "id", bill_id))?;

        if bill.is_paid() {
            return Err(DomainError::Conflict(format!(
                "Bill {} is already paid",
                bill.bill_number
            )));
        }
        Ok(bill)
    }

    async fn record(&self, tx: &PaymentTransaction, bill: Bill) -> DomainResult<()> {
        self.repos.payments().record(tx.clone(), bill).await?;

        let outcome = if tx.status == PaymentStatus::Success {
            "success"
        } else {
            "declined"
        };
        metrics::counter!("payments_total", "outcome" => outcome).increment(1);

        if tx.status == PaymentStatus::Success {
            info!(
                transaction_id = tx.transaction_id.as_str(),
                bill_id = tx.bill_id,
                amount = %tx.amount,
                retry_count = tx.retry_count,
                "Payment succeeded"
            );
        } else {
            warn!(
                transaction_id = tx.transaction_id.as_str(),
                bill_id = tx.bill_id,
                retry_count = tx.retry_count,
                reason = tx.failure_reason.as_deref().unwrap_or_default(),
                "Payment declined"
            );
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::billing::testing::{repos, FixedGateway};
    use crate::domain::{BillStatus, BillingCycle, UserSubscription};
    use rust_decimal_macros::dec;

    async fn bill(repos: &Arc<dyn RepositoryProvider>) -> Bill {
        let now = Utc::now();
        let sub = repos
            .subscriptions()
            .save(UserSubscription::start(5, 1, BillingCycle::Monthly, dec!(29.99), now))
            .await
            .unwrap();
        repos.bills().save(Bill::for_subscription(&sub, now)).await.unwrap()
    }

    fn service(repos: &Arc<dyn RepositoryProvider>, gateway: Arc<FixedGateway>) -> PaymentService {
        PaymentService::new(repos.clone(), gateway, BillingPolicy::default())
    }

    #[tokio::test]
    async fn approved_payment_marks_bill_paid() {
        let repos = repos();
        let bill = bill(&repos).await;
        let outcome = service(&repos, FixedGateway::new(true))
            .initiate(bill.id, "CREDIT_CARD")
            .await
            .unwrap();

        assert!(outcome.succeeded());
        assert_eq!(outcome.message, "Payment processed successfully");
        assert_eq!(outcome.transaction.amount, dec!(29.99));
        assert_eq!(outcome.transaction.user_id, 5);

        let bill = repos.bills().find_by_id(bill.id).await.unwrap().unwrap();
        assert_eq!(bill.status, BillStatus::Paid);
        assert!(bill.paid_date.is_some());
    }

    #[tokio::test]
    async fn declined_payment_schedules_retry() {
        let repos = repos();
        let bill = bill(&repos).await;
        let outcome = service(&repos, FixedGateway::new(false))
            .initiate(bill.id, "CREDIT_CARD")
            .await
            .unwrap();

        let tx = &outcome.transaction;
        assert_eq!(tx.status, PaymentStatus::Failed);
        assert_eq!(tx.failure_reason.as_deref(), Some("Payment declined by provider"));
        assert_eq!(tx.retry_count, 0);
        assert!(tx.scheduled_retry_date.is_some());
        assert!(outcome.message.starts_with("Payment failed. Scheduled for retry on "));

        let bill = repos.bills().find_by_id(bill.id).await.unwrap().unwrap();
        assert_eq!(bill.status, BillStatus::Failed);
    }

    #[tokio::test]
    async fn paid_bill_cannot_be_charged_again() {
        let repos = repos();
        let bill = bill(&repos).await;
        let svc = service(&repos, FixedGateway::new(true));
        svc.initiate(bill.id, "CARD").await.unwrap();

        assert!(matches!(
            svc.initiate(bill.id, "CARD").await.unwrap_err(),
            DomainError::Conflict(_)
        ));
    }

    #[tokio::test]
    async fn retry_creates_new_transaction() {
        let repos = repos();
        let bill = bill(&repos).await;
        let gateway = FixedGateway::new(false);
        let svc = service(&repos, gateway.clone());

        let first = svc.initiate(bill.id, "CARD").await.unwrap().transaction;
        gateway.set(true);
        let outcome = svc.retry(&first.transaction_id).await.unwrap();

        assert_eq!(outcome.message, "Payment retry successful");
        assert_ne!(outcome.transaction.transaction_id, first.transaction_id);
        assert_eq!(outcome.transaction.retry_count, 1);

        let old = svc.get(&first.transaction_id).await.unwrap();
        assert!(old.scheduled_retry_date.is_none());
        assert_eq!(old.status, PaymentStatus::Cancelled);
        assert_eq!(svc.by_bill(bill.id).await.unwrap().len(), 2);
        assert_eq!(
            repos.bills().find_by_id(bill.id).await.unwrap().unwrap().status,
            BillStatus::Paid
        );
    }

    #[tokio::test]
    async fn only_failed_transactions_retry() {
        let repos = repos();
        let bill = bill(&repos).await;
        let svc = service(&repos, FixedGateway::new(true));
        let tx = svc.initiate(bill.id, "CARD").await.unwrap().transaction;

        match svc.retry(&tx.transaction_id).await.unwrap_err() {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "Only failed transactions can be retried")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn retries_stop_at_the_limit() {
        let repos = repos();
        let bill = bill(&repos).await;
        let svc = service(&repos, FixedGateway::new(false));

        let mut tx = svc.initiate(bill.id, "CARD").await.unwrap().transaction;
        for attempt in 1..=3 {
            let outcome = svc.retry(&tx.transaction_id).await.unwrap();
            assert_eq!(outcome.transaction.retry_count, attempt);
            tx = outcome.transaction;
        }

        assert!(tx.scheduled_retry_date.is_none());
        assert_eq!(tx.failure_reason.as_deref(), Some("Payment declined on retry"));
        assert!(matches!(
            svc.retry(&tx.transaction_id).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn superseded_transaction_cannot_be_retried_again() {
        let repos = repos();
        let bill = bill(&repos).await;
        let svc = service(&repos, FixedGateway::new(false));

        let first = svc.initiate(bill.id, "CARD").await.unwrap().transaction;
        svc.retry(&first.transaction_id).await.unwrap();

        match svc.retry(&first.transaction_id).await.unwrap_err() {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "Only failed transactions can be retried")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(svc.by_bill(bill.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_retries_charge_once() {
        let repos = repos();
        let bill = bill(&repos).await;
        let svc = Arc::new(service(&repos, FixedGateway::new(false)));
        let first = svc.initiate(bill.id, "CARD").await.unwrap().transaction;

        let (a, b) = tokio::join!(
            svc.retry(&first.transaction_id),
            svc.retry(&first.transaction_id)
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        assert_eq!(svc.by_bill(bill.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn last_retry_reports_limit() {
        let repos = repos();
        let bill = bill(&repos).await;
        let svc = service(&repos, FixedGateway::new(false));

        let mut tx = svc.initiate(bill.id, "CARD").await.unwrap().transaction;
        let mut message = String::new();
        for _ in 0..3 {
            let outcome = svc.retry(&tx.transaction_id).await.unwrap();
            message = outcome.message;
            tx = outcome.transaction;
        }
        assert_eq!(message, "Payment retry failed. Retry limit reached");
    }

    #[tokio::test]
    async fn status_lookup_is_case_insensitive() {
        let repos = repos();
        let bill = bill(&repos).await;
        let svc = service(&repos, FixedGateway::new(false));
        svc.initiate(bill.id, "CARD").await.unwrap();

        assert_eq!(svc.by_status("failed").await.unwrap().len(), 1);
        assert_eq!(svc.by_user(5).await.unwrap().len(), 1);
        assert!(matches!(
            svc.by_status("lost").await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }
}
