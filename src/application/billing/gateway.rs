//! Payment provider seam

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::domain::PaymentTransaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeOutcome {
    Approved,
    Declined,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, transaction: &PaymentTransaction) -> ChargeOutcome;
}

/// Stand-in provider that approves a fixed share of charges at random
pub struct SimulatedGateway {
    success_rate: f64,
}

impl SimulatedGateway {
    pub fn new(success_rate: f64) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, transaction: &PaymentTransaction) -> ChargeOutcome {
        let approved = rand::thread_rng().gen_bool(self.success_rate);
        debug!(
            transaction_id = transaction.transaction_id.as_str(),
            approved, "Simulated charge"
        );
        if approved {
            ChargeOutcome::Approved
        } else {
            ChargeOutcome::Declined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bill, BillingCycle, UserSubscription};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn tx() -> PaymentTransaction {
        let now = Utc::now();
        let sub = UserSubscription::start(1, 1, BillingCycle::Monthly, dec!(5), now);
        PaymentTransaction::for_bill(&Bill::for_subscription(&sub, now), "CARD", now)
    }

    #[tokio::test]
    async fn extreme_rates_are_deterministic() {
        let tx = tx();
        assert_eq!(SimulatedGateway::new(1.0).charge(&tx).await, ChargeOutcome::Approved);
        assert_eq!(SimulatedGateway::new(0.0).charge(&tx).await, ChargeOutcome::Declined);
        // out-of-range rates are clamped
        assert_eq!(SimulatedGateway::new(7.5).charge(&tx).await, ChargeOutcome::Approved);
    }
}
