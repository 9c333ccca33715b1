//! Bills module: subscription bills and sales invoices

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
