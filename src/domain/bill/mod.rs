//! Bill aggregate
//!
//! A bill is one billing period of a subscription awaiting payment.

pub mod model;
pub mod repository;

pub use model::{Bill, BillStatus};
pub use repository::BillRepository;
