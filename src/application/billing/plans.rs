//! Subscription plan catalogue

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{DomainError, DomainResult, PlanType, RepositoryProvider, SubscriptionPlan};

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct PlanUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub monthly_price: Option<Decimal>,
    pub yearly_price: Option<Decimal>,
    pub features: Option<String>,
    pub active: Option<bool>,
    pub is_default: Option<bool>,
    pub plan_type: Option<PlanType>,
    pub discount_percentage: Option<Decimal>,
    pub offer_valid_until: Option<DateTime<Utc>>,
    pub max_users: Option<i32>,
    pub max_bills_per_month: Option<i32>,
    pub priority_support: Option<bool>,
    pub custom_branding: Option<bool>,
}

pub struct PlanService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PlanService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<SubscriptionPlan>> {
        self.repos.plans().find_all().await
    }

    pub async fn active(&self) -> DomainResult<Vec<SubscriptionPlan>> {
        self.repos.plans().find_active().await
    }

    pub async fn defaults(&self) -> DomainResult<Vec<SubscriptionPlan>> {
        let plans = self.repos.plans().find_active().await?;
        Ok(plans.into_iter().filter(|p| p.is_default).collect())
    }

    pub async fn offers(&self) -> DomainResult<Vec<SubscriptionPlan>> {
        let now = Utc::now();
        let plans = self.repos.plans().find_active().await?;
        Ok(plans.into_iter().filter(|p| p.is_offer(now)).collect())
    }

    pub async fn by_type(&self, plan_type: PlanType) -> DomainResult<Vec<SubscriptionPlan>> {
        self.repos.plans().find_by_type(plan_type).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<SubscriptionPlan> {
        self.repos
            .plans()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("SubscriptionPlan", "id", id))
    }

    pub async fn create(&self, plan: SubscriptionPlan) -> DomainResult<SubscriptionPlan> {
        plan.validate()?;
        if self.repos.plans().find_by_name(&plan.name).await?.is_some() {
            return Err(DomainError::Conflict(format!("Plan '{}'", plan.name)));
        }

        let plan = self.repos.plans().save(plan).await?;
        info!(plan_id = plan.id, name = plan.name.as_str(), "Subscription plan created");
        Ok(plan)
    }

    pub async fn update(&self, id: i32, update: PlanUpdate) -> DomainResult<SubscriptionPlan> {
        let mut plan = self.get(id).await?;

        if let Some(name) = update.name {
            if name != plan.name && self.repos.plans().find_by_name(&name).await?.is_some() {
                return Err(DomainError::Conflict(format!("Plan '{}'", name)));
            }
            plan.name = name;
        }
        if update.description.is_some() {
            plan.description = update.description;
        }
        if let Some(price) = update.monthly_price {
            plan.monthly_price = price;
        }
        if let Some(price) = update.yearly_price {
            plan.yearly_price = price;
        }
        if update.features.is_some() {
            plan.features = update.features;
        }
        if let Some(active) = update.active {
            plan.active = active;
        }
        if let Some(is_default) = update.is_default {
            plan.is_default = is_default;
        }
        if let Some(plan_type) = update.plan_type {
            plan.plan_type = plan_type;
        }
        if update.discount_percentage.is_some() {
            plan.discount_percentage = update.discount_percentage;
        }
        if update.offer_valid_until.is_some() {
            plan.offer_valid_until = update.offer_valid_until;
        }
        if update.max_users.is_some() {
            plan.max_users = update.max_users;
        }
        if update.max_bills_per_month.is_some() {
            plan.max_bills_per_month = update.max_bills_per_month;
        }
        if let Some(flag) = update.priority_support {
            plan.priority_support = flag;
        }
        if let Some(flag) = update.custom_branding {
            plan.custom_branding = flag;
        }

        plan.validate()?;
        plan.updated_at = Utc::now();
        let plan = self.repos.plans().update(plan).await?;
        info!(plan_id = id, "Subscription plan updated");
        Ok(plan)
    }

    /// Soft delete: the plan stays for existing subscriptions.
    pub async fn deactivate(&self, id: i32) -> DomainResult<()> {
        self.set_active(id, false).await.map(|_| ())
    }

    pub async fn activate(&self, id: i32) -> DomainResult<SubscriptionPlan> {
        self.set_active(id, true).await
    }

    async fn set_active(&self, id: i32, active: bool) -> DomainResult<SubscriptionPlan> {
        let mut plan = self.get(id).await?;
        plan.active = active;
        plan.updated_at = Utc::now();
        let plan = self.repos.plans().update(plan).await?;
        info!(plan_id = id, active, "Subscription plan availability changed");
        Ok(plan)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::billing::testing::repos;
    use crate::domain::plan::model::tests::sample_plan;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn duplicate_names_conflict() {
        let service = PlanService::new(repos());
        service.create(sample_plan()).await.unwrap();
        let err = service.create(sample_plan()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn soft_delete_hides_from_active() {
        let service = PlanService::new(repos());
        let plan = service.create(sample_plan()).await.unwrap();

        service.deactivate(plan.id).await.unwrap();
        assert!(service.active().await.unwrap().is_empty());
        assert_eq!(service.list().await.unwrap().len(), 1);

        service.activate(plan.id).await.unwrap();
        assert_eq!(service.active().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn defaults_and_offers_are_disjoint() {
        let service = PlanService::new(repos());
        let mut basic = sample_plan();
        basic.name = "Basic".into();
        basic.is_default = true;
        service.create(basic).await.unwrap();

        let mut promo = sample_plan();
        promo.name = "Spring Promo".into();
        promo.offer_valid_until = Some(Utc::now() + chrono::Duration::days(3));
        service.create(promo).await.unwrap();

        let mut expired = sample_plan();
        expired.name = "Old Promo".into();
        expired.offer_valid_until = Some(Utc::now() - chrono::Duration::days(3));
        service.create(expired).await.unwrap();

        let defaults = service.defaults().await.unwrap();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].name, "Basic");

        let offers = service.offers().await.unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].name, "Spring Promo");
    }

    #[tokio::test]
    async fn update_rejects_negative_price() {
        let service = PlanService::new(repos());
        let plan = service.create(sample_plan()).await.unwrap();

        let err = service
            .update(plan.id, PlanUpdate { monthly_price: Some(dec!(-1)), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let updated = service
            .update(plan.id, PlanUpdate { monthly_price: Some(dec!(19.99)), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(updated.monthly_price, dec!(19.99));
    }

    #[tokio::test]
    async fn missing_plan_is_not_found() {
        let service = PlanService::new(repos());
        assert!(matches!(
            service.get(99).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
