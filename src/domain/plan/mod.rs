//! Subscription plan aggregate

pub mod model;
pub mod repository;

pub use model::{PlanType, SubscriptionPlan};
pub use repository::PlanRepository;
