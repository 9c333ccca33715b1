//! Identity module: users and authentication
//!
//! Contains the `UserService` which orchestrates login, customer
//! registration and the bootstrap admin account.

pub mod service;

pub use service::{AuthResult, UserService};
