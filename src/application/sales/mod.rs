//! Sales ledger, product catalog and suggestion use-cases

mod products;
mod service;
mod suggestions;

pub use products::ProductService;
pub use service::SalesService;
pub use suggestions::SuggestionService;
