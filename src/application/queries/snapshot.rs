//! Last loaded station listing.
//!
//! Single-writer state owned by the presentation layer. It goes stale relative
//! to the store and is refreshed only by an explicit reload.

use crate::application::services::StationRegistryService;
use crate::domain::{Station, StationStatus};

use super::{StationFilter, StationStatistics};

#[derive(Debug, Clone, Default)]
pub struct StationSnapshot {
    stations: Vec<Station>,
}

impl StationSnapshot {
    pub async fn reload_all(&mut self, service: &StationRegistryService) -> &[Station] {
        self.stations = service.find_all().await;
        &self.stations
    }

    pub async fn reload_search(
        &mut self,
        service: &StationRegistryService,
        text: &str,
    ) -> &[Station] {
        self.stations = service.search(text).await;
        &self.stations
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn filter(&self, text: &str, status: Option<StationStatus>) -> Vec<Station> {
        StationFilter::new(text, status).apply(&self.stations)
    }

    /// Reflect a successful status change without reloading.
    ///
    /// Returns `false` when the id is not part of the snapshot.
    pub fn apply_status_change(&mut self, id: i64, status: StationStatus) -> bool {
        match self.stations.iter_mut().find(|s| s.id == id) {
            Some(station) => {
                station.status = status;
                true
            }
            None => false,
        }
    }

    pub fn statistics(&self) -> StationStatistics {
        StationStatistics::from_stations(&self.stations)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    async fn seeded_service() -> StationRegistryService {
        let service = StationRegistryService::new(Arc::new(InMemoryStorage::new()));
        for (name, location, status) in [
            ("Main St", Some("Downtown"), StationStatus::Available),
            ("Airport", Some("Terminal 1"), StationStatus::Charging),
            ("Depot", None, StationStatus::OutOfService),
        ] {
            service
                .create(Station::new(name, location.map(String::from), status))
                .await
                .unwrap();
        }
        service
    }

    #[tokio::test]
    async fn snapshot_goes_stale_until_reloaded() {
        let service = seeded_service().await;
        let mut snapshot = StationSnapshot::default();
        assert_eq!(snapshot.reload_all(&service).await.len(), 3);

        service
            .create(Station::new("New One", None, StationStatus::Available))
            .await
            .unwrap();
        assert_eq!(snapshot.len(), 3);

        snapshot.reload_all(&service).await;
        assert_eq!(snapshot.len(), 4);
    }

    #[tokio::test]
    async fn filter_narrows_a_searched_load() {
        let service = seeded_service().await;
        let mut snapshot = StationSnapshot::default();
        snapshot.reload_search(&service, "t").await;

        let names: Vec<String> = snapshot
            .filter("", Some(StationStatus::Charging))
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Airport"]);
    }

    #[tokio::test]
    async fn status_change_is_mirrored_locally() {
        let service = seeded_service().await;
        let mut snapshot = StationSnapshot::default();
        snapshot.reload_all(&service).await;

        let depot = snapshot
            .stations()
            .iter()
            .find(|s| s.name == "Depot")
            .unwrap()
            .id;
        assert!(service
            .update_status(depot, StationStatus::Available)
            .await
            .unwrap());
        assert!(snapshot.apply_status_change(depot, StationStatus::Available));
        assert!(!snapshot.apply_status_change(999, StationStatus::Available));

        assert_eq!(snapshot.statistics().available, 2);
        assert_eq!(snapshot.statistics(), service.statistics().await);
    }
}
