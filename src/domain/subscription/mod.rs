//! User subscription aggregate
//!
//! Links a user to a plan and tracks the billing cycle.

pub mod model;
pub mod repository;

pub use model::{BillingCycle, SubscriptionStatus, UserSubscription};
pub use repository::SubscriptionRepository;
