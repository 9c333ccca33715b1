//! Subscription plan domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::subscription::BillingCycle;
use crate::shared::errors::DomainError;

/// Plan tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanType {
    #[default]
    Basic,
    Premium,
    Enterprise,
    Custom,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Premium => "PREMIUM",
            Self::Enterprise => "ENTERPRISE",
            Self::Custom => "CUSTOM",
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BASIC" => Ok(Self::Basic),
            "PREMIUM" => Ok(Self::Premium),
            "ENTERPRISE" => Ok(Self::Enterprise),
            "CUSTOM" => Ok(Self::Custom),
            other => Err(DomainError::Validation(format!("Unknown plan type: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscriptionPlan {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub monthly_price: Decimal,
    pub yearly_price: Decimal,
    /// Free-text feature list shown on the plan picker
    pub features: Option<String>,
    pub active: bool,
    pub is_default: bool,
    pub plan_type: PlanType,
    pub discount_percentage: Option<Decimal>,
    pub offer_valid_until: Option<DateTime<Utc>>,
    pub max_users: Option<i32>,
    pub max_bills_per_month: Option<i32>,
    pub priority_support: bool,
    pub custom_branding: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionPlan {
    /// Price charged per billing cycle.
    pub fn price_for(&self, cycle: BillingCycle) -> Decimal {
        match cycle {
            BillingCycle::Monthly => self.monthly_price,
            BillingCycle::Yearly => self.yearly_price,
        }
    }

    /// Active, non-default plans whose offer window is still open.
    pub fn is_offer(&self, now: DateTime<Utc>) -> bool {
        self.active
            && !self.is_default
            && self.offer_valid_until.map_or(true, |until| until > now)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("Plan name is required".into()));
        }
        if self.monthly_price.is_sign_negative() || self.yearly_price.is_sign_negative() {
            return Err(DomainError::Validation("Plan prices must not be negative".into()));
        }
        if let Some(discount) = self.discount_percentage {
            if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
                return Err(DomainError::Validation(
                    "Discount percentage must be between 0 and 100".into(),
                ));
            }
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
