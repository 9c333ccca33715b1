//! User subscription domain entity

use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};
use rust_decimal::Decimal;

use crate::shared::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// End of the billing period that starts at `from`.
    pub fn advance(&self, from: DateTime<Utc>) -> DateTime<Utc> {
        let months = match self {
            Self::Monthly => Months::new(1),
            Self::Yearly => Months::new(12),
        };
        // Only overflows near the end of chrono's representable range.
        from.checked_add_months(months).unwrap_or(from)
    }

    /// Days between issuing a bill and its due date.
    pub fn payment_terms(&self) -> Duration {
        match self {
            Self::Monthly => Duration::days(7),
            Self::Yearly => Duration::days(14),
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingCycle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MONTHLY" => Ok(Self::Monthly),
            "YEARLY" => Ok(Self::Yearly),
            other => Err(DomainError::Validation(format!(
                "Unknown billing cycle: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
    Pending,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
            Self::Expired => "EXPIRED",
            Self::Pending => "PENDING",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "CANCELLED" => Ok(Self::Cancelled),
            "EXPIRED" => Ok(Self::Expired),
            "PENDING" => Ok(Self::Pending),
            other => Err(DomainError::Validation(format!(
                "Unknown subscription status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserSubscription {
    pub id: i32,
    pub user_id: i32,
    pub plan_id: i32,
    pub billing_cycle: BillingCycle,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub next_billing_date: Option<DateTime<Utc>>,
    /// Amount charged per cycle, fixed at subscription time
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserSubscription {
    pub fn start(
        user_id: i32,
        plan_id: i32,
        billing_cycle: BillingCycle,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            user_id,
            plan_id,
            billing_cycle,
            status: SubscriptionStatus::Active,
            start_date: now,
            end_date: None,
            next_billing_date: Some(billing_cycle.advance(now)),
            amount,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && self.next_billing_date.is_some_and(|next| next <= now)
    }

    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::Validation(format!(
                "Subscription {} is {} and cannot be cancelled",
                self.id, self.status
            )));
        }
        self.status = SubscriptionStatus::Cancelled;
        self.end_date = Some(now);
        self.next_billing_date = None;
        self.updated_at = now;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
