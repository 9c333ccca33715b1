//! User aggregate
//!
//! Billing customers and the operators who log in to the API.

pub mod model;
pub mod repository;

pub use model::{User, UserRole};
pub use repository::UserRepository;
