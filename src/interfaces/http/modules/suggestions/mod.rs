//! Suggestions module: insights derived from the sales ledger

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
