//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: explicit handle to the per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::station::StationRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to the domain repositories.
///
/// Passed explicitly to the services that need it; there is no process-wide
/// connection. Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let station = repos.stations().find_by_id(42).await?;
///     let admin = repos.users().find_by_username("admin").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn stations(&self) -> &dyn StationRepository;
    fn users(&self) -> &dyn UserRepository;
}
