//! Payment transaction aggregate
//!
//! Each charge attempt against a bill is its own transaction; a retry
//! creates a new transaction that carries the incremented retry count.

pub mod model;
pub mod repository;

pub use model::{PaymentStatus, PaymentTransaction};
pub use repository::PaymentRepository;
