//! Payment transaction domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::domain::bill::Bill;
use crate::shared::errors::DomainError;
use crate::shared::money::reference_code;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    Retrying,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Retrying => "RETRYING",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "SUCCESS" => Ok(Self::Success),
            "FAILED" => Ok(Self::Failed),
            "RETRYING" => Ok(Self::Retrying),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(DomainError::Validation(format!(
                "Unknown transaction status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaymentTransaction {
    /// `TXN-` followed by 12 uppercase hex characters
    pub transaction_id: String,
    pub user_id: i32,
    pub bill_id: i32,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub payment_method: String,
    pub transaction_date: DateTime<Utc>,
    pub scheduled_retry_date: Option<DateTime<Utc>>,
    pub failure_reason: Option<String>,
    pub retry_count: i32,
    pub metadata: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentTransaction {
    /// First charge attempt for a bill.
    pub fn for_bill(bill: &Bill, payment_method: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            transaction_id: reference_code("TXN", 12),
            user_id: bill.user_id,
            bill_id: bill.id,
            amount: bill.amount,
            status: PaymentStatus::Pending,
            payment_method: payment_method.into(),
            transaction_date: now,
            scheduled_retry_date: None,
            failure_reason: None,
            retry_count: 0,
            metadata: Map::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Follow-up attempt for this failed transaction.
    pub fn retry(&self, now: DateTime<Utc>) -> Self {
        let mut metadata = Map::new();
        metadata.insert(
            "retry_of".into(),
            Value::String(self.transaction_id.clone()),
        );
        Self {
            transaction_id: reference_code("TXN", 12),
            user_id: self.user_id,
            bill_id: self.bill_id,
            amount: self.amount,
            status: PaymentStatus::Retrying,
            payment_method: self.payment_method.clone(),
            transaction_date: now,
            scheduled_retry_date: None,
            failure_reason: None,
            retry_count: self.retry_count + 1,
            metadata,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == PaymentStatus::Failed
    }

    pub fn succeed(&mut self, now: DateTime<Utc>) {
        self.status = PaymentStatus::Success;
        self.failure_reason = None;
        self.scheduled_retry_date = None;
        self.updated_at = now;
    }

    pub fn decline(
        &mut self,
        reason: impl Into<String>,
        retry_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) {
        self.status = PaymentStatus::Failed;
        self.failure_reason = Some(reason.into());
        self.scheduled_retry_date = retry_at;
        self.updated_at = now;
    }

    /// Retire a failed attempt once its follow-up exists. A superseded
    /// transaction is CANCELLED and can no longer be retried.
    pub fn supersede(&mut self, now: DateTime<Utc>) {
        self.status = PaymentStatus::Cancelled;
        self.scheduled_retry_date = None;
        self.updated_at = now;
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::{BillingCycle, UserSubscription};
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn bill() -> Bill {
        let now = Utc::now();
        let sub = UserSubscription::start(7, 1, BillingCycle::Monthly, dec!(9.99), now);
        let mut bill = Bill::for_subscription(&sub, now);
        bill.id = 21;
        bill
    }

    #[test]
    fn first_attempt_copies_bill() {
        let now = Utc::now();
        let tx = PaymentTransaction::for_bill(&bill(), "CARD", now);
        assert!(tx.transaction_id.starts_with("TXN-"));
        assert_eq!(tx.transaction_id.len(), 16);
        assert_eq!(tx.user_id, 7);
        assert_eq!(tx.bill_id, 21);
        assert_eq!(tx.amount, dec!(9.99));
        assert_eq!(tx.status, PaymentStatus::Pending);
        assert_eq!(tx.retry_count, 0);
    }

    #[test]
    fn decline_schedules_retry() {
        let now = Utc::now();
        let mut tx = PaymentTransaction::for_bill(&bill(), "CARD", now);
        tx.decline("Payment declined by provider", Some(now + Duration::days(1)), now);
        assert!(tx.is_failed());
        assert_eq!(tx.failure_reason.as_deref(), Some("Payment declined by provider"));
        assert_eq!(tx.scheduled_retry_date, Some(now + Duration::days(1)));
    }

    #[test]
    fn retry_is_a_new_transaction() {
        let now = Utc::now();
        let mut tx = PaymentTransaction::for_bill(&bill(), "CARD", now);
        tx.decline("declined", None, now);
        let next = tx.retry(now);
        assert_ne!(next.transaction_id, tx.transaction_id);
        assert_eq!(next.status, PaymentStatus::Retrying);
        assert_eq!(next.retry_count, 1);
        assert_eq!(next.payment_method, "CARD");
        assert_eq!(
            next.metadata.get("retry_of"),
            Some(&Value::String(tx.transaction_id.clone()))
        );
    }

    #[test]
    fn superseded_attempt_is_not_retryable() {
        let now = Utc::now();
        let mut tx = PaymentTransaction::for_bill(&bill(), "CARD", now);
        tx.decline("declined", Some(now + Duration::days(1)), now);
        tx.supersede(now);
        assert!(!tx.is_failed());
        assert_eq!(tx.status, PaymentStatus::Cancelled);
        assert!(tx.scheduled_retry_date.is_none());
        assert_eq!(tx.failure_reason.as_deref(), Some("declined"));
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("failed".parse::<PaymentStatus>().unwrap(), PaymentStatus::Failed);
        assert!("bogus".parse::<PaymentStatus>().is_err());
    }
}
