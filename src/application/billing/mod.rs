//! Billing use-cases
//!
//! Plans, subscriptions, subscription bills, payments with retry, stored
//! cards, and the background scheduler that ties them together.

mod bills;
mod cards;
mod gateway;
mod payments;
mod plans;
mod scheduler;
mod subscriptions;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub use bills::BillService;
pub use cards::CardService;
pub use gateway::{ChargeOutcome, PaymentGateway, SimulatedGateway};
pub use payments::{PaymentOutcome, PaymentService};
pub use plans::{PlanService, PlanUpdate};
pub use scheduler::{run_billing_cycle, start_billing_scheduler, CycleReport};
pub use subscriptions::SubscriptionService;

/// Tunables shared by the billing services
#[derive(Debug, Clone)]
pub struct BillingPolicy {
    /// Tax applied to the taxable amount of a sales invoice
    pub tax_rate: Decimal,
    /// Discount premium customers get on every sale
    pub premium_discount_rate: Decimal,
    /// Delay before a declined payment is retried
    pub retry_delay: chrono::Duration,
    /// Retries allowed after the first declined attempt
    pub max_payment_retries: i32,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: dec!(0.10),
            premium_discount_rate: dec!(0.20),
            retry_delay: chrono::Duration::hours(24),
            max_payment_retries: 3,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{PaymentTransaction, RepositoryProvider};
    use crate::infrastructure::InMemoryRepositoryProvider;

    /// Gateway whose answer the test controls
    pub(crate) struct FixedGateway {
        approve: AtomicBool,
    }

    impl FixedGateway {
        pub(crate) fn new(approve: bool) -> Arc<Self> {
            Arc::new(Self {
                approve: AtomicBool::new(approve),
            })
        }

        pub(crate) fn set(&self, approve: bool) {
            self.approve.store(approve, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl PaymentGateway for FixedGateway {
        async fn charge(&self, _transaction: &PaymentTransaction) -> ChargeOutcome {
            if self.approve.load(Ordering::SeqCst) {
                ChargeOutcome::Approved
            } else {
                ChargeOutcome::Declined
            }
        }
    }

    pub(crate) fn repos() -> Arc<dyn RepositoryProvider> {
        Arc::new(InMemoryRepositoryProvider::new())
    }
}
