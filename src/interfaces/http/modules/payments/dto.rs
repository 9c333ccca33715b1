//! Payment DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::billing::PaymentOutcome;
use crate::domain::PaymentTransaction;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionDto {
    pub transaction_id: String,
    pub user_id: i32,
    pub bill_id: i32,
    #[schema(value_type = String, example = "29.99")]
    pub amount: Decimal,
    /// `PENDING`, `SUCCESS`, `FAILED`, `RETRYING` or `CANCELLED`
    pub status: String,
    pub payment_method: String,
    pub transaction_date: DateTime<Utc>,
    pub scheduled_retry_date: Option<DateTime<Utc>>,
    pub failure_reason: Option<String>,
    pub retry_count: i32,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PaymentTransaction> for TransactionDto {
    fn from(t: PaymentTransaction) -> Self {
        Self {
            transaction_id: t.transaction_id,
            user_id: t.user_id,
            bill_id: t.bill_id,
            amount: t.amount,
            status: t.status.as_str().to_string(),
            payment_method: t.payment_method,
            transaction_date: t.transaction_date,
            scheduled_retry_date: t.scheduled_retry_date,
            failure_reason: t.failure_reason,
            retry_count: t.retry_count,
            metadata: t.metadata,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InitiatePaymentRequest {
    #[validate(range(min = 1, message = "bill_id must be positive"))]
    pub bill_id: i32,
    #[validate(length(min = 1, max = 50, message = "payment_method must be 1–50 characters"))]
    pub payment_method: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResultDto {
    pub success: bool,
    pub message: String,
    pub transaction: TransactionDto,
}

impl From<PaymentOutcome> for PaymentResultDto {
    fn from(outcome: PaymentOutcome) -> Self {
        Self {
            success: outcome.succeeded(),
            message: outcome.message,
            transaction: outcome.transaction.into(),
        }
    }
}
