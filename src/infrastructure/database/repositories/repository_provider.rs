//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::bill::BillRepository;
use crate::domain::card::CardRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::plan::PlanRepository;
use crate::domain::product::ProductRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::sale::SaleRepository;
use crate::domain::subscription::SubscriptionRepository;
use crate::domain::user::UserRepository;

use super::bill_repository::SeaOrmBillRepository;
use super::card_repository::SeaOrmCardRepository;
use super::payment_repository::SeaOrmPaymentRepository;
use super::plan_repository::SeaOrmPlanRepository;
use super::product_repository::SeaOrmProductRepository;
use super::sale_repository::SeaOrmSaleRepository;
use super::subscription_repository::SeaOrmSubscriptionRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let bill = repos.bills().find_by_id(7).await?;
/// let due = repos.subscriptions().find_due(Utc::now()).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    plans: SeaOrmPlanRepository,
    subscriptions: SeaOrmSubscriptionRepository,
    bills: SeaOrmBillRepository,
    payments: SeaOrmPaymentRepository,
    sales: SeaOrmSaleRepository,
    products: SeaOrmProductRepository,
    cards: SeaOrmCardRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            plans: SeaOrmPlanRepository::new(db.clone()),
            subscriptions: SeaOrmSubscriptionRepository::new(db.clone()),
            bills: SeaOrmBillRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db.clone()),
            sales: SeaOrmSaleRepository::new(db.clone()),
            products: SeaOrmProductRepository::new(db.clone()),
            cards: SeaOrmCardRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn plans(&self) -> &dyn PlanRepository {
        &self.plans
    }

    fn subscriptions(&self) -> &dyn SubscriptionRepository {
        &self.subscriptions
    }

    fn bills(&self) -> &dyn BillRepository {
        &self.bills
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }

    fn sales(&self) -> &dyn SaleRepository {
        &self.sales
    }

    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }

    fn cards(&self) -> &dyn CardRepository {
        &self.cards
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sale::model::tests::new_sale;
    use crate::domain::{
        Bill, BillStatus, BillingCycle, DomainError, PaymentStatus, PaymentTransaction,
    };
    use crate::domain::{Sale, User, UserSubscription};
    use crate::infrastructure::database::migrator::Migrator;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    async fn repos() -> SeaOrmRepositoryProvider {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmRepositoryProvider::new(db)
    }

    #[tokio::test]
    async fn migrations_seed_standard_plans() {
        let repos = repos().await;
        let plans = repos.plans().find_active().await.unwrap();
        let names: Vec<_> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Basic", "Professional", "Enterprise"]);
        assert_eq!(plans[1].monthly_price, dec!(29.99));
    }

    #[tokio::test]
    async fn users_round_trip_with_role() {
        let repos = repos().await;
        let saved = repos
            .users()
            .save(User::new_admin("ops@nexuspay.local", "Ops", "hash".into()))
            .await
            .unwrap();
        assert!(saved.id > 0);
        assert_eq!(repos.users().count_admins().await.unwrap(), 1);

        let found = repos.users().find_by_email("ops@nexuspay.local").await.unwrap().unwrap();
        assert!(found.is_admin());
    }

    #[tokio::test]
    async fn sales_query_by_window() {
        let repos = repos().await;
        let now = Utc::now();
        let sale = Sale::record(new_sale(1, "Laptop", 2, dec!(100)), dec!(0.2), now).unwrap();
        repos.sales().save(sale).await.unwrap();

        let hit = repos
            .sales()
            .find_between(now - chrono::Duration::hours(1), now + chrono::Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].total_price, dec!(200));

        let miss = repos
            .sales()
            .find_between(now + chrono::Duration::hours(1), now + chrono::Duration::hours(2))
            .await
            .unwrap();
        assert!(miss.is_empty());
    }

    async fn saved_bill(repos: &SeaOrmRepositoryProvider) -> Bill {
        let now = Utc::now();
        let user = repos
            .users()
            .save(User::new_customer("payer@example.com", "Payer"))
            .await
            .unwrap();
        let sub = repos
            .subscriptions()
            .save(UserSubscription::start(user.id, 1, BillingCycle::Monthly, dec!(9.99), now))
            .await
            .unwrap();
        repos.bills().save(Bill::for_subscription(&sub, now)).await.unwrap()
    }

    #[tokio::test]
    async fn payment_and_bill_commit_together() {
        let repos = repos().await;
        let now = Utc::now();
        let mut bill = saved_bill(&repos).await;

        let mut tx = PaymentTransaction::for_bill(&bill, "CARD", now);
        tx.succeed(now);
        bill.mark_paid(now);
        repos.payments().record(tx, bill.clone()).await.unwrap();
        assert_eq!(
            repos.bills().find_by_id(bill.id).await.unwrap().unwrap().status,
            BillStatus::Paid
        );

        let mut again = PaymentTransaction::for_bill(&bill, "CARD", now);
        again.succeed(now);
        assert!(matches!(
            repos.payments().record(again, bill.clone()).await.unwrap_err(),
            DomainError::Conflict(_)
        ));
        assert_eq!(repos.payments().find_by_bill(bill.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn retry_claim_is_conditional() {
        let repos = repos().await;
        let now = Utc::now();
        let bill = saved_bill(&repos).await;

        let mut tx = PaymentTransaction::for_bill(&bill, "CARD", now);
        tx.decline("declined", Some(now), now);
        repos.payments().save(tx.clone()).await.unwrap();

        assert!(repos.payments().claim_for_retry(&tx.transaction_id, now).await.unwrap());
        assert!(!repos.payments().claim_for_retry(&tx.transaction_id, now).await.unwrap());

        let stored = repos.payments().find_by_id(&tx.transaction_id).await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Cancelled);
        assert!(stored.scheduled_retry_date.is_none());
        assert!(matches!(
            repos.payments().claim_for_retry("TXN-MISSING", now).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
