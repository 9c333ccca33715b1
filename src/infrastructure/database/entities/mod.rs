//! Database entities module

pub mod bill;
pub mod card_detail;
pub mod payment_transaction;
pub mod product;
pub mod sale;
pub mod subscription_plan;
pub mod user;
pub mod user_subscription;

pub use bill::Entity as Bill;
pub use card_detail::Entity as CardDetail;
pub use payment_transaction::Entity as PaymentTransaction;
pub use product::Entity as Product;
pub use sale::Entity as Sale;
pub use subscription_plan::Entity as SubscriptionPlan;
pub use user::Entity as User;
pub use user_subscription::Entity as UserSubscription;
