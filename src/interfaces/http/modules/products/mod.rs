//! Products module: catalog and stock levels

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
