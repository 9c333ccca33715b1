//! Business suggestions derived from the sales ledger
//!
//! [`SuggestionEngine`] scores products, categories, customers and regions
//! and emits actionable [`Suggestion`]s. Pure over a snapshot of sales and
//! stock levels.

pub mod engine;
pub mod model;

pub use engine::{PerformanceStatus, ProductPerformance, SuggestionEngine};
pub use model::{Priority, Suggestion, SuggestionCategory, SuggestionFilter};
