//! Subscription plan DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::billing::PlanUpdate;
use crate::domain::{DomainResult, PlanType, SubscriptionPlan};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlanDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "29.99")]
    pub monthly_price: Decimal,
    #[schema(value_type = String, example = "299.99")]
    pub yearly_price: Decimal,
    pub features: Option<String>,
    pub active: bool,
    pub is_default: bool,
    /// `BASIC`, `PREMIUM`, `ENTERPRISE` or `CUSTOM`
    pub plan_type: String,
    #[schema(value_type = Option<String>)]
    pub discount_percentage: Option<Decimal>,
    pub offer_valid_until: Option<DateTime<Utc>>,
    pub max_users: Option<i32>,
    pub max_bills_per_month: Option<i32>,
    pub priority_support: bool,
    pub custom_branding: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SubscriptionPlan> for PlanDto {
    fn from(p: SubscriptionPlan) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            monthly_price: p.monthly_price,
            yearly_price: p.yearly_price,
            features: p.features,
            active: p.active,
            is_default: p.is_default,
            plan_type: p.plan_type.as_str().to_string(),
            discount_percentage: p.discount_percentage,
            offer_valid_until: p.offer_valid_until,
            max_users: p.max_users,
            max_bills_per_month: p.max_bills_per_month,
            priority_support: p.priority_support,
            custom_branding: p.custom_branding,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1–100 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "9.99")]
    pub monthly_price: Decimal,
    #[schema(value_type = String, example = "99.99")]
    pub yearly_price: Decimal,
    pub features: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    /// Defaults to `CUSTOM`
    pub plan_type: Option<String>,
    #[schema(value_type = Option<String>)]
    pub discount_percentage: Option<Decimal>,
    pub offer_valid_until: Option<DateTime<Utc>>,
    pub max_users: Option<i32>,
    pub max_bills_per_month: Option<i32>,
    #[serde(default)]
    pub priority_support: bool,
    #[serde(default)]
    pub custom_branding: bool,
}

impl CreatePlanRequest {
    pub fn into_plan(self) -> DomainResult<SubscriptionPlan> {
        let plan_type = match self.plan_type.as_deref() {
            Some(s) => s.parse()?,
            None => PlanType::Custom,
        };
        let now = Utc::now();
        Ok(SubscriptionPlan {
            id: 0,
            name: self.name.trim().to_string(),
            description: self.description,
            monthly_price: self.monthly_price,
            yearly_price: self.yearly_price,
            features: self.features,
            active: true,
            is_default: self.is_default,
            plan_type,
            discount_percentage: self.discount_percentage,
            offer_valid_until: self.offer_valid_until,
            max_users: self.max_users,
            max_bills_per_month: self.max_bills_per_month,
            priority_support: self.priority_support,
            custom_branding: self.custom_branding,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1–100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub monthly_price: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub yearly_price: Option<Decimal>,
    pub features: Option<String>,
    pub active: Option<bool>,
    pub is_default: Option<bool>,
    pub plan_type: Option<String>,
    #[schema(value_type = Option<String>)]
    pub discount_percentage: Option<Decimal>,
    pub offer_valid_until: Option<DateTime<Utc>>,
    pub max_users: Option<i32>,
    pub max_bills_per_month: Option<i32>,
    pub priority_support: Option<bool>,
    pub custom_branding: Option<bool>,
}

impl UpdatePlanRequest {
    pub fn into_update(self) -> DomainResult<PlanUpdate> {
        Ok(PlanUpdate {
            plan_type: self.plan_type.as_deref().map(str::parse).transpose()?,
            name: self.name,
            description: self.description,
            monthly_price: self.monthly_price,
            yearly_price: self.yearly_price,
            features: self.features,
            active: self.active,
            is_default: self.is_default,
            discount_percentage: self.discount_percentage,
            offer_valid_until: self.offer_valid_until,
            max_users: self.max_users,
            max_bills_per_month: self.max_bills_per_month,
            priority_support: self.priority_support,
            custom_branding: self.custom_branding,
        })
    }
}
