//! Multi-station delete.

use tracing::{info, warn};

use station_registry::{DomainError, StationRegistryService};

/// Per-id outcome of a batch delete. Every id is attempted.
#[derive(Debug, Default)]
pub struct DeletionSummary {
    pub deleted: Vec<i64>,
    /// No row matched the id.
    pub missing: Vec<i64>,
    pub failed: Vec<(i64, DomainError)>,
}

impl DeletionSummary {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.failed.is_empty()
    }
}

/// Delete each id in turn; a missing id or a failure never stops the rest.
pub async fn delete_stations(registry: &StationRegistryService, ids: &[i64]) -> DeletionSummary {
    let mut summary = DeletionSummary::default();
    for &id in ids {
        match registry.delete(id).await {
            Ok(true) => summary.deleted.push(id),
            Ok(false) => summary.missing.push(id),
            Err(e) => {
                warn!(station_id = id, error = %e, "Station delete failed");
                summary.failed.push((id, e));
            }
        }
    }
    info!(
        deleted = summary.deleted.len(),
        missing = summary.missing.len(),
        failed = summary.failed.len(),
        "Batch delete finished"
    );
    summary
}
