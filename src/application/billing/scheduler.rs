//! Background task that issues due bills and retries declined payments.
//!
//! Runs in a tokio::spawn loop. Each tick bills every active subscription
//! whose `next_billing_date` has passed, then retries failed transactions
//! whose `scheduled_retry_date` has passed.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{info, warn};

use super::{BillService, PaymentService};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::shutdown::ShutdownSignal;
use crate::shared::utills::{retry_with_backoff, RetryConfig};

/// What one scheduler pass did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub bills_issued: usize,
    pub payments_retried: usize,
    pub failures: usize,
}

/// Start the billing scheduler. An interval of 0 disables it and returns
/// `None`; otherwise the task ends once `shutdown` is triggered.
pub fn start_billing_scheduler(
    repos: Arc<dyn RepositoryProvider>,
    bills: Arc<BillService>,
    payments: Arc<PaymentService>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
) -> Option<JoinHandle<()>> {
    if check_interval_secs == 0 {
        info!("Billing scheduler disabled");
        return None;
    }

    Some(tokio::spawn(async move {
        info!(check_interval = check_interval_secs, "Billing scheduler started");

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match run_billing_cycle(&repos, &bills, &payments).await {
                        Ok(report) if report != CycleReport::default() => {
                            info!(
                                bills_issued = report.bills_issued,
                                payments_retried = report.payments_retried,
                                failures = report.failures,
                                "Billing cycle completed"
                            );
                        }
                        Ok(_) => {}
                        Err(e) => warn!(error = %e, "Billing cycle error"),
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("Billing scheduler shutting down");
                    break;
                }
            }
        }

        info!("Billing scheduler stopped");
    }))
}

/// One scheduler pass.
pub async fn run_billing_cycle(
    repos: &Arc<dyn RepositoryProvider>,
    bills: &BillService,
    payments: &PaymentService,
) -> DomainResult<CycleReport> {
    let now = Utc::now();
    let mut report = CycleReport::default();

    let due = retry_with_backoff(
        RetryConfig::default(),
        || repos.subscriptions().find_due(now),
        DomainError::is_transient,
        "find_due_subscriptions",
    )
    .await?;

    for subscription in due {
        match bills.generate_for_subscription(subscription.id).await {
            Ok(_) => report.bills_issued += 1,
            Err(e) => {
                report.failures += 1;
                warn!(subscription_id = subscription.id, error = %e, "Failed to issue bill");
            }
        }
    }

    let max_retries = payments.max_retries();
    let retries = retry_with_backoff(
        RetryConfig::default(),
        || repos.payments().find_due_retries(now, max_retries),
        DomainError::is_transient,
        "find_due_retries",
    )
    .await?;

    for tx in retries {
        match payments.retry(&tx.transaction_id).await {
            Ok(_) => report.payments_retried += 1,
            Err(e) => {
                report.failures += 1;
                warn!(
                    transaction_id = tx.transaction_id.as_str(),
                    error = %e,
                    "Scheduled retry failed"
                );
            }
        }
    }

    Ok(report)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::billing::testing::{repos, FixedGateway};
    use crate::application::billing::BillingPolicy;
    use crate::domain::{Bill, BillingCycle, PaymentStatus, PaymentTransaction, UserSubscription};
    use chrono::Duration as ChronoDuration;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn due_subscription_gets_billed_once() {
        let repos = repos();
        let past = Utc::now() - ChronoDuration::days(40);
        let sub = repos
            .subscriptions()
            .save(UserSubscription::start(1, 1, BillingCycle::Monthly, dec!(9.99), past))
            .await
            .unwrap();

        let bills = BillService::new(repos.clone(), BillingPolicy::default());
        let payments =
            PaymentService::new(repos.clone(), FixedGateway::new(true), BillingPolicy::default());

        let report = run_billing_cycle(&repos, &bills, &payments).await.unwrap();
        assert_eq!(report.bills_issued, 1);

        let sub = repos.subscriptions().find_by_id(sub.id).await.unwrap().unwrap();
        assert!(sub.next_billing_date.unwrap() > Utc::now());

        let report = run_billing_cycle(&repos, &bills, &payments).await.unwrap();
        assert_eq!(report, CycleReport::default());
    }

    #[tokio::test]
    async fn due_failed_payment_is_retried() {
        let repos = repos();
        let now = Utc::now();
        let sub = UserSubscription::start(1, 1, BillingCycle::Monthly, dec!(9.99), now);
        let bill = repos.bills().save(Bill::for_subscription(&sub, now)).await.unwrap();

        let mut tx = PaymentTransaction::for_bill(&bill, "CARD", now);
        tx.decline("Payment declined by provider", Some(now - ChronoDuration::minutes(1)), now);
        repos.payments().save(tx.clone()).await.unwrap();

        let bills = BillService::new(repos.clone(), BillingPolicy::default());
        let payments =
            PaymentService::new(repos.clone(), FixedGateway::new(true), BillingPolicy::default());

        let report = run_billing_cycle(&repos, &bills, &payments).await.unwrap();
        assert_eq!(report.payments_retried, 1);

        let success = repos.payments().find_by_status(PaymentStatus::Success).await.unwrap();
        assert_eq!(success.len(), 1);
        assert_eq!(success[0].retry_count, 1);
    }

    fn services(repos: &Arc<dyn RepositoryProvider>) -> (Arc<BillService>, Arc<PaymentService>) {
        let bills = Arc::new(BillService::new(repos.clone(), BillingPolicy::default()));
        let payments = Arc::new(PaymentService::new(
            repos.clone(),
            FixedGateway::new(true),
            BillingPolicy::default(),
        ));
        (bills, payments)
    }

    #[tokio::test]
    async fn scheduler_task_ends_after_shutdown() {
        let repos = repos();
        let (bills, payments) = services(&repos);
        let shutdown = ShutdownSignal::new();

        let handle = start_billing_scheduler(repos, bills, payments, shutdown.clone(), 3600)
            .expect("scheduler should be running");
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("scheduler should stop promptly")
            .unwrap();
    }

    #[tokio::test]
    async fn zero_interval_starts_nothing() {
        let repos = repos();
        let (bills, payments) = services(&repos);
        let handle = start_billing_scheduler(repos, bills, payments, ShutdownSignal::new(), 0);
        assert!(handle.is_none());
    }
}
