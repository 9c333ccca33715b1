//! Subscription lifecycle

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::BillService;
use crate::domain::{
    Bill, BillingCycle, DomainError, DomainResult, RepositoryProvider, UserSubscription,
};

pub struct SubscriptionService {
    repos: Arc<dyn RepositoryProvider>,
    bills: Arc<BillService>,
}

impl SubscriptionService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, bills: Arc<BillService>) -> Self {
        Self { repos, bills }
    }

    /// Subscribe a user to an active plan and issue the first bill.
    pub async fn create(
        &self,
        user_id: i32,
        plan_id: i32,
        cycle: BillingCycle,
    ) -> DomainResult<(UserSubscription, Bill)> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;

        let plan = self
            .repos
            .plans()
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| DomainError::not_found("SubscriptionPlan", "id", plan_id))?;

        if !plan.active {
            return Err(DomainError::Validation(format!(
                "Plan '{}' is not available",
                plan.name
            )));
        }

        let subscription = UserSubscription::start(
            user_id,
            plan_id,
            cycle,
            plan.price_for(cycle),
            Utc::now(),
        );
        let subscription = self.repos.subscriptions().save(subscription).await?;

        info!(
            subscription_id = subscription.id,
            user_id,
            plan_id,
            cycle = cycle.as_str(),
            amount = %subscription.amount,
            "Subscription created"
        );

        let bill = self.bills.generate_for_subscription(subscription.id).await?;
        let subscription = self
            .repos
            .subscriptions()
            .find_by_id(subscription.id)
            .await?
            .unwrap_or(subscription);

        Ok((subscription, bill))
    }

    pub async fn user_subscriptions(&self, user_id: i32) -> DomainResult<Vec<UserSubscription>> {
        self.repos.subscriptions().find_by_user(user_id).await
    }

    pub async fn has_active(&self, user_id: i32) -> DomainResult<bool> {
        let active = self.repos.subscriptions().find_active_by_user(user_id).await?;
        Ok(!active.is_empty())
    }

    pub async fn cancel(&self, id: i32) -> DomainResult<UserSubscription> {
        let mut subscription = self
            .repos
            .subscriptions()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Subscription", "id", id))?;

        subscription.cancel(Utc::now())?;
        self.repos.subscriptions().update(subscription.clone()).await?;

        info!(subscription_id = id, user_id = subscription.user_id, "Subscription cancelled");
        Ok(subscription)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::billing::testing::repos;
    use crate::application::billing::BillingPolicy;
    use crate::domain::plan::model::tests::sample_plan;
    use crate::domain::{SubscriptionStatus, User};
    use rust_decimal_macros::dec;

    async fn setup() -> (Arc<dyn RepositoryProvider>, SubscriptionService, i32, i32) {
        let repos = repos();
        let user = repos
            .users()
            .save(User::new_customer("carol@example.com", "Carol"))
            .await
            .unwrap();
        let plan = repos.plans().save(sample_plan()).await.unwrap();
        let bills = Arc::new(BillService::new(repos.clone(), BillingPolicy::default()));
        let service = SubscriptionService::new(repos.clone(), bills);
        (repos, service, user.id, plan.id)
    }

    #[tokio::test]
    async fn create_issues_first_bill() {
        let (_repos, service, user_id, plan_id) = setup().await;
        let (sub, bill) = service.create(user_id, plan_id, BillingCycle::Yearly).await.unwrap();

        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.amount, dec!(299.99));
        assert_eq!(bill.amount, dec!(299.99));
        assert_eq!(bill.subscription_id, Some(sub.id));
        assert_eq!(sub.next_billing_date, Some(bill.billing_period_end));
        assert!(service.has_active(user_id).await.unwrap());
    }

    #[tokio::test]
    async fn inactive_plan_is_rejected() {
        let (repos, service, user_id, plan_id) = setup().await;
        let mut plan = repos.plans().find_by_id(plan_id).await.unwrap().unwrap();
        plan.active = false;
        repos.plans().update(plan).await.unwrap();

        let err = service.create(user_id, plan_id, BillingCycle::Monthly).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (_repos, service, _user_id, plan_id) = setup().await;
        let err = service.create(404, plan_id, BillingCycle::Monthly).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));
    }

    #[tokio::test]
    async fn cancel_twice_fails() {
        let (_repos, service, user_id, plan_id) = setup().await;
        let (sub, _) = service.create(user_id, plan_id, BillingCycle::Monthly).await.unwrap();

        let cancelled = service.cancel(sub.id).await.unwrap();
        assert_eq!(cancelled.status, SubscriptionStatus::Cancelled);
        assert!(cancelled.end_date.is_some());
        assert!(!service.has_active(user_id).await.unwrap());
        assert!(service.cancel(sub.id).await.is_err());
    }
}
