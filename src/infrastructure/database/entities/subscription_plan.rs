//! Subscription plan entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plan catalog row; `plan_type` holds BASIC / PREMIUM / ENTERPRISE / CUSTOM
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscription_plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub monthly_price: Decimal,
    pub yearly_price: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub features: Option<String>,
    pub active: bool,
    pub is_default: bool,
    pub plan_type: String,
    pub discount_percentage: Option<Decimal>,
    pub offer_valid_until: Option<DateTime<Utc>>,
    pub max_users: Option<i32>,
    pub max_bills_per_month: Option<i32>,
    pub priority_support: bool,
    pub custom_branding: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_subscription::Entity")]
    Subscriptions,
}

impl Related<super::user_subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
