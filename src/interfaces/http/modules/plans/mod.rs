//! Plans module: subscription plan catalog

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
