pub mod auth;
pub mod bills;
pub mod cards;
pub mod health;
pub mod metrics;
pub mod payments;
pub mod plans;
pub mod products;
pub mod request_id;
pub mod sales;
pub mod subscriptions;
pub mod suggestions;
pub mod users;
