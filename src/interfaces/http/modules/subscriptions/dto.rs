//! Subscription DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::UserSubscription;
use crate::interfaces::http::modules::bills::BillDto;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionDto {
    pub id: i32,
    pub user_id: i32,
    pub plan_id: i32,
    /// `MONTHLY` or `YEARLY`
    pub billing_cycle: String,
    /// `ACTIVE`, `CANCELLED`, `EXPIRED` or `PENDING`
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub next_billing_date: Option<DateTime<Utc>>,
    #[schema(value_type = String, example = "29.99")]
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserSubscription> for SubscriptionDto {
    fn from(s: UserSubscription) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            plan_id: s.plan_id,
            billing_cycle: s.billing_cycle.as_str().to_string(),
            status: s.status.as_str().to_string(),
            start_date: s.start_date,
            end_date: s.end_date,
            next_billing_date: s.next_billing_date,
            amount: s.amount,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubscriptionRequest {
    #[validate(range(min = 1, message = "user_id must be positive"))]
    pub user_id: i32,
    #[validate(range(min = 1, message = "plan_id must be positive"))]
    pub plan_id: i32,
    /// `MONTHLY` or `YEARLY`
    pub billing_cycle: String,
}

/// New subscription together with the first bill issued for it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionCreatedDto {
    pub subscription: SubscriptionDto,
    pub bill: BillDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HasActiveDto {
    pub user_id: i32,
    pub has_active_subscription: bool,
}
