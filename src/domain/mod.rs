//! Domain layer
//!
//! One directory per aggregate, each with its entity (`model.rs`) and,
//! where it is persisted, a repository trait (`repository.rs`). `invoice`
//! and `suggestion` are pure computations over the sales ledger.

pub mod bill;
pub mod card;
pub mod invoice;
pub mod payment;
pub mod plan;
pub mod product;
pub mod repositories;
pub mod sale;
pub mod subscription;
pub mod suggestion;
pub mod user;

pub use bill::{Bill, BillStatus};
pub use card::CardDetail;
pub use payment::{PaymentStatus, PaymentTransaction};
pub use plan::{PlanType, SubscriptionPlan};
pub use product::Product;
pub use repositories::{DomainResult, RepositoryProvider};
pub use sale::Sale;
pub use subscription::{BillingCycle, SubscriptionStatus, UserSubscription};
pub use user::{User, UserRole};

pub use crate::shared::errors::DomainError;
