//! Payments module: charging bills and querying payment transactions

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
