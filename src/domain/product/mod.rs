//! Product catalog aggregate

pub mod model;
pub mod repository;

pub use model::Product;
pub use repository::ProductRepository;
