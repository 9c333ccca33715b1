//! Subscription bills and sales invoices

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::BillingPolicy;
use crate::domain::invoice::{InvoiceRequest, PeriodWindow, SalesInvoice};
use crate::domain::{Bill, BillStatus, DomainError, DomainResult, RepositoryProvider};

pub struct BillService {
    repos: Arc<dyn RepositoryProvider>,
    policy: BillingPolicy,
}

impl BillService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, policy: BillingPolicy) -> Self {
        Self { repos, policy }
    }

    /// Issue the next bill of an active subscription and move its billing date.
    pub async fn generate_for_subscription(&self, subscription_id: i32) -> DomainResult<Bill> {
        let mut subscription = self
            .repos
            .subscriptions()
            .find_by_id(subscription_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Subscription", "id", subscription_id))?;

        if !subscription.is_active() {
            return Err(DomainError::Validation(format!(
                "Subscription {} is {}",
                subscription_id, subscription.status
            )));
        }

        let now = Utc::now();
        let bill = self
            .repos
            .bills()
            .save(Bill::for_subscription(&subscription, now))
            .await?;

        subscription.next_billing_date = Some(bill.billing_period_end);
        subscription.updated_at = now;
        self.repos.subscriptions().update(subscription).await?;

        metrics::counter!("bills_issued_total").increment(1);
        info!(
            bill_id = bill.id,
            bill_number = bill.bill_number.as_str(),
            subscription_id,
            amount = %bill.amount,
            "Bill issued"
        );
        Ok(bill)
    }

    pub async fn get(&self, id: i32) -> DomainResult<Bill> {
        self.repos
            .bills()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bill", "id", id))
    }

    pub async fn user_bills(&self, user_id: i32) -> DomainResult<Vec<Bill>> {
        self.repos.bills().find_by_user(user_id).await
    }

    pub async fn pending(&self) -> DomainResult<Vec<Bill>> {
        self.repos.bills().find_by_status(BillStatus::Pending).await
    }

    /// Build an invoice from the sales recorded in the requested period.
    ///
    /// Computed on demand; nothing is persisted.
    pub async fn generate_from_sales(&self, request: InvoiceRequest) -> DomainResult<SalesInvoice> {
        let now = Utc::now();
        let window = PeriodWindow::resolve(
            request.period,
            request.start_date,
            request.end_date,
            now.date_naive(),
        )?;

        let (from, to) = window.bounds();
        let sales = self.repos.sales().find_between(from, to).await?;
        let invoice = SalesInvoice::build(&request, window, &sales, self.policy.tax_rate, now);

        info!(
            bill_number = invoice.bill_number.as_str(),
            period = invoice.period.as_str(),
            line_items = invoice.line_items.len(),
            grand_total = %invoice.grand_total,
            "Sales invoice generated"
        );
        Ok(invoice)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::billing::testing::repos;
    use crate::domain::invoice::BillingPeriod;
    use crate::domain::sale::model::tests::new_sale;
    use crate::domain::{BillingCycle, Sale, UserSubscription};
    use chrono::{Duration, NaiveDate, TimeZone};
    use rust_decimal_macros::dec;

    async fn active_subscription(repos: &Arc<dyn RepositoryProvider>) -> UserSubscription {
        repos
            .subscriptions()
            .save(UserSubscription::start(1, 1, BillingCycle::Monthly, dec!(9.99), Utc::now()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn bill_moves_next_billing_date() {
        let repos = repos();
        let sub = active_subscription(&repos).await;
        let service = BillService::new(repos.clone(), BillingPolicy::default());

        let bill = service.generate_for_subscription(sub.id).await.unwrap();
        assert_eq!(bill.amount, dec!(9.99));
        assert_eq!(bill.status, BillStatus::Pending);

        let sub = repos.subscriptions().find_by_id(sub.id).await.unwrap().unwrap();
        assert_eq!(sub.next_billing_date, Some(bill.billing_period_end));
        assert_eq!(service.pending().await.unwrap().len(), 1);
        assert_eq!(service.user_bills(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cancelled_subscription_is_not_billed() {
        let repos = repos();
        let mut sub = active_subscription(&repos).await;
        sub.cancel(Utc::now()).unwrap();
        repos.subscriptions().update(sub.clone()).await.unwrap();

        let service = BillService::new(repos, BillingPolicy::default());
        assert!(matches!(
            service.generate_for_subscription(sub.id).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn invoice_only_covers_the_window() {
        let repos = repos();
        for (day, price) in [(3, dec!(100)), (20, dec!(50))] {
            let mut input = new_sale(1, "Desk Lamp", 1, price);
            input.sale_date = Some(Utc.with_ymd_and_hms(2026, 4, day, 23, 59, 59).unwrap());
            let sale = Sale::record(input, dec!(0.2), Utc::now()).unwrap();
            repos.sales().save(sale).await.unwrap();
        }

        let service = BillService::new(repos, BillingPolicy::default());
        let invoice = service
            .generate_from_sales(InvoiceRequest {
                period: BillingPeriod::Custom,
                start_date: NaiveDate::from_ymd_opt(2026, 4, 1),
                end_date: NaiveDate::from_ymd_opt(2026, 4, 3),
                customer_id: None,
                customer_name: None,
            })
            .await
            .unwrap();

        assert_eq!(invoice.total_transactions, 1);
        assert_eq!(invoice.subtotal, dec!(100));
        assert_eq!(invoice.tax_amount, dec!(10));
        assert_eq!(invoice.grand_total, dec!(110));
    }

    #[tokio::test]
    async fn custom_invoice_needs_dates() {
        let service = BillService::new(repos(), BillingPolicy::default());
        let err = service
            .generate_from_sales(InvoiceRequest {
                period: BillingPeriod::Custom,
                start_date: None,
                end_date: None,
                customer_id: None,
                customer_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn this_week_invoice_includes_todays_sales() {
        let repos = repos();
        let mut input = new_sale(1, "Notebook", 2, dec!(4));
        input.sale_date = Some(Utc::now() - Duration::seconds(1));
        repos
            .sales()
            .save(Sale::record(input, dec!(0.2), Utc::now()).unwrap())
            .await
            .unwrap();

        let service = BillService::new(repos, BillingPolicy::default());
        let invoice = service
            .generate_from_sales(InvoiceRequest {
                period: BillingPeriod::Week,
                start_date: None,
                end_date: None,
                customer_id: None,
                customer_name: None,
            })
            .await
            .unwrap();
        assert!(invoice.period.starts_with("Week of "));
        assert_eq!(invoice.total_items_sold, 2);
    }
}
