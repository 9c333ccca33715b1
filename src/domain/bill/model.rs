//! Bill domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::subscription::UserSubscription;
use crate::shared::errors::DomainError;
use crate::shared::money::reference_code;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    Pending,
    Paid,
    Failed,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "FAILED" => Ok(Self::Failed),
            other => Err(DomainError::Validation(format!("Unknown bill status: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bill {
    pub id: i32,
    pub user_id: i32,
    pub subscription_id: Option<i32>,
    /// Human-facing reference, `BILL-XXXXXXXX`
    pub bill_number: String,
    pub amount: Decimal,
    pub status: BillStatus,
    pub billing_period_start: DateTime<Utc>,
    pub billing_period_end: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Issue the bill for the period of `subscription` starting at `now`.
    pub fn for_subscription(subscription: &UserSubscription, now: DateTime<Utc>) -> Self {
        let cycle = subscription.billing_cycle;
        Self {
            id: 0,
            user_id: subscription.user_id,
            subscription_id: Some(subscription.id),
            bill_number: reference_code("BILL", 8),
            amount: subscription.amount,
            status: BillStatus::Pending,
            billing_period_start: now,
            billing_period_end: cycle.advance(now),
            due_date: now + cycle.payment_terms(),
            paid_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }

    pub fn mark_paid(&mut self, now: DateTime<Utc>) {
        self.status = BillStatus::Paid;
        self.paid_date = Some(now);
        self.updated_at = now;
    }

    pub fn mark_failed(&mut self, now: DateTime<Utc>) {
        self.status = BillStatus::Failed;
        self.updated_at = now;
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::BillingCycle;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    #[test]
    fn monthly_bill_is_due_in_a_week() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let mut sub = UserSubscription::start(4, 2, BillingCycle::Monthly, dec!(29.99), now);
        sub.id = 11;

        let bill = Bill::for_subscription(&sub, now);
        assert_eq!(bill.user_id, 4);
        assert_eq!(bill.subscription_id, Some(11));
        assert_eq!(bill.amount, dec!(29.99));
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.billing_period_end, Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap());
        assert_eq!(bill.due_date, now + Duration::days(7));
        assert!(bill.bill_number.starts_with("BILL-"));
        assert_eq!(bill.bill_number.len(), 13);
    }

    #[test]
    fn yearly_bill_is_due_in_two_weeks() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let sub = UserSubscription::start(4, 2, BillingCycle::Yearly, dec!(299.99), now);
        let bill = Bill::for_subscription(&sub, now);
        assert_eq!(bill.billing_period_end, Utc.with_ymd_and_hms(2027, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(bill.due_date, now + Duration::days(14));
    }

    #[test]
    fn mark_paid_records_date() {
        let now = Utc::now();
        let sub = UserSubscription::start(1, 1, BillingCycle::Monthly, dec!(9.99), now);
        let mut bill = Bill::for_subscription(&sub, now);
        bill.mark_failed(now);
        assert_eq!(bill.status, BillStatus::Failed);
        bill.mark_paid(now);
        assert!(bill.is_paid());
        assert_eq!(bill.paid_date, Some(now));
    }
}
