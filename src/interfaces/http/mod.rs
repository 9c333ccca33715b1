//! HTTP REST API interfaces
//!
//! - `common`: response envelope, pagination, validated JSON extractor
//! - `middleware`: JWT authentication middleware
//! - `modules`: one module per resource (dto + handlers)
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiServices};
