//! # NexusPay billing service
//!
//! Subscription billing and sales analytics behind a JWT-protected REST API.
//!
//! ## Architecture
//!
//! - **domain**: entities, repository traits, invoice and suggestion rules
//! - **application**: use-cases (billing, identity, sales)
//! - **infrastructure**: SeaORM persistence, in-memory store, crypto
//! - **interfaces**: Axum REST API with Swagger documentation
//! - **server**: runtime wiring and graceful shutdown
//! - **shared**: errors, money, pagination, retry, shutdown helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, CONFIG_ENV};

pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

pub use interfaces::http::{create_api_router, ApiServices};
