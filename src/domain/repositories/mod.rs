//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::bill::BillRepository;
use super::card::CardRepository;
use super::payment::PaymentRepository;
use super::plan::PlanRepository;
use super::product::ProductRepository;
use super::sale::SaleRepository;
use super::subscription::SubscriptionRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let bill = repos.bills().find_by_id(7).await?;
///     let txs = repos.payments().find_by_bill(7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn plans(&self) -> &dyn PlanRepository;
    fn subscriptions(&self) -> &dyn SubscriptionRepository;
    fn bills(&self) -> &dyn BillRepository;
    fn payments(&self) -> &dyn PaymentRepository;
    fn sales(&self) -> &dyn SaleRepository;
    fn products(&self) -> &dyn ProductRepository;
    fn cards(&self) -> &dyn CardRepository;
}
