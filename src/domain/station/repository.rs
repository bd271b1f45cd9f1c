//! Station repository interface

use async_trait::async_trait;

use super::model::Station;
use crate::domain::DomainResult;

/// Durable keyed storage for stations.
///
/// Every method may fail with `DomainError::StorageFailure`.
#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Inserts a new record and returns it with the generated id and timestamp.
    async fn insert(&self, station: Station) -> DomainResult<Station>;
    /// Replaces the stored record with the same id. `true` iff a row was affected.
    async fn update(&self, station: Station) -> DomainResult<bool>;
    /// `true` iff a row was removed.
    async fn delete(&self, id: i64) -> DomainResult<bool>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Station>>;
    /// All stations ordered by name ascending.
    async fn find_all(&self) -> DomainResult<Vec<Station>>;
    /// Case-insensitive substring match on name or location, ordered by name ascending.
    async fn search(&self, pattern: &str) -> DomainResult<Vec<Station>>;
}
