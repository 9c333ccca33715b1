//! Sales ledger aggregate
//!
//! Contains the Sale entity, the pure analytics over a slice of sales,
//! and the repository interface.

pub mod analytics;
pub mod model;
pub mod repository;

pub use analytics::{
    CategorySales, PeriodGranularity, PeriodSales, ProductSales, SalesAnalytics,
};
pub use model::{DateRange, NewSale, Sale};
pub use repository::SaleRepository;
