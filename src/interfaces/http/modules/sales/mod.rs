//! Sales module: ledger and analytics

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
