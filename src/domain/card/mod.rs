//! Stored payment card aggregate

pub mod model;
pub mod repository;

pub use model::{CardDetail, CardUpdate, NewCard};
pub use repository::CardRepository;
