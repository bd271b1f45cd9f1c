//! Station registry service
//!
//! Validates caller input, delegates to the injected store, and owns the
//! status workflow and statistics. The service does not consult the session's
//! access mode: gating mutating calls is the caller's job (see
//! [`crate::application::session::Session::ensure_can_mutate`]).

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::queries::StationStatistics;
use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, Station, StationRepository, StationStatus,
};
use crate::shared::validations::{validate_station_id, validate_station_name};

pub struct StationRegistryService {
    repos: Arc<dyn RepositoryProvider>,
}

impl StationRegistryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    fn store(&self) -> &dyn StationRepository {
        self.repos.stations()
    }

    /// Insert a new station. The store assigns id and timestamp.
    pub async fn create(&self, station: Station) -> DomainResult<Station> {
        validate_station_name("create", &station.name)?;

        let created = self.store().insert(station).await?;
        info!(station_id = created.id, name = %created.name, "Station created");
        Ok(created)
    }

    /// Replace a station's fields. `Ok(false)` when no row matched the id.
    pub async fn update(&self, station: Station) -> DomainResult<bool> {
        validate_station_id("update", station.id)?;
        validate_station_name("update", &station.name)?;

        let station_id = station.id;
        let updated = self.store().update(station).await?;
        if updated {
            info!(station_id, "Station updated");
        } else {
            debug!(station_id, "Station update matched no row");
        }
        Ok(updated)
    }

    /// Change only the status of an existing station.
    ///
    /// Read-modify-write through [`StationRegistryService::update`]: the record is
    /// fetched, its status replaced in memory, and the full record written back.
    /// Not atomic; a concurrent writer between the read and the write is lost.
    pub async fn update_status(&self, id: i64, status: StationStatus) -> DomainResult<bool> {
        validate_station_id("update_status", id)?;

        let Some(mut station) = self.store().find_by_id(id).await? else {
            return Err(DomainError::NotFound {
                entity: "Station",
                field: "id",
                value: id.to_string(),
            });
        };

        let previous = station.status;
        station.status = status;
        let updated = self.update(station).await?;

        info!(
            station_id = id,
            from = %previous,
            to = %status,
            updated,
            "Station status changed"
        );
        Ok(updated)
    }

    /// Permanently remove a station. `Ok(false)` when the id does not exist.
    pub async fn delete(&self, id: i64) -> DomainResult<bool> {
        validate_station_id("delete", id)?;

        let deleted = self.store().delete(id).await?;
        if deleted {
            info!(station_id = id, "Station deleted");
        }
        Ok(deleted)
    }

    /// `None` for non-positive ids without calling the store.
    pub async fn find_by_id(&self, id: i64) -> DomainResult<Option<Station>> {
        if id <= 0 {
            return Ok(None);
        }
        self.store().find_by_id(id).await
    }

    /// All stations ordered by name.
    ///
    /// Fail-soft: a storage failure is logged and yields an empty list.
    pub async fn find_all(&self) -> Vec<Station> {
        match self.store().find_all().await {
            Ok(stations) => stations,
            Err(e) => {
                warn!(operation = "find_all", error = %e, "Station load failed, returning no stations");
                Vec::new()
            }
        }
    }

    /// Stations whose name or location contains `text`, ignoring case.
    ///
    /// Blank `text` behaves like [`StationRegistryService::find_all`]. Fail-soft
    /// like `find_all`.
    pub async fn search(&self, text: &str) -> Vec<Station> {
        let text = text.trim();
        if text.is_empty() {
            return self.find_all().await;
        }

        match self.store().search(text).await {
            Ok(stations) => stations,
            Err(e) => {
                warn!(operation = "search", pattern = text, error = %e, "Station search failed, returning no stations");
                Vec::new()
            }
        }
    }

    /// Counts per status over a fresh [`StationRegistryService::find_all`].
    pub async fn statistics(&self) -> StationStatistics {
        StationStatistics::from_stations(&self.find_all().await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{CreateUserDto, User, UserRepository};
    use crate::infrastructure::storage::InMemoryStorage;

    /// Wraps the in-memory store, counting calls and optionally failing all of
    /// them or a single operation.
    struct ProbeStore {
        inner: InMemoryStorage,
        calls: AtomicUsize,
        failing: bool,
        failing_operation: Option<&'static str>,
    }

    impl ProbeStore {
        fn new(failing: bool) -> Self {
            Self {
                inner: InMemoryStorage::new(),
                calls: AtomicUsize::new(0),
                failing,
                failing_operation: None,
            }
        }

        fn failing_on(operation: &'static str) -> Self {
            Self {
                failing_operation: Some(operation),
                ..Self::new(false)
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn enter(&self, operation: &'static str) -> DomainResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing || self.failing_operation == Some(operation) {
                return Err(DomainError::storage(operation, "connection refused"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl StationRepository for ProbeStore {
        async fn insert(&self, station: Station) -> DomainResult<Station> {
            self.enter("insert")?;
            self.inner.insert(station).await
        }

        async fn update(&self, station: Station) -> DomainResult<bool> {
            self.enter("update")?;
            StationRepository::update(&self.inner, station).await
        }

        async fn delete(&self, id: i64) -> DomainResult<bool> {
            self.enter("delete")?;
            self.inner.delete(id).await
        }

        async fn find_by_id(&self, id: i64) -> DomainResult<Option<Station>> {
            self.enter("find_by_id")?;
            self.inner.find_by_id(id).await
        }

        async fn find_all(&self) -> DomainResult<Vec<Station>> {
            self.enter("find_all")?;
            self.inner.find_all().await
        }

        async fn search(&self, pattern: &str) -> DomainResult<Vec<Station>> {
            self.enter("search")?;
            self.inner.search(pattern).await
        }
    }

    #[async_trait]
    impl UserRepository for ProbeStore {
        async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
            self.inner.find_by_username(username).await
        }

        async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
            self.inner.create_user(dto).await
        }

        async fn count_users(&self) -> DomainResult<u64> {
            self.inner.count_users().await
        }
    }

    impl RepositoryProvider for ProbeStore {
        fn stations(&self) -> &dyn StationRepository {
            self
        }

        fn users(&self) -> &dyn UserRepository {
            self
        }
    }

    fn service_with(store: Arc<ProbeStore>) -> StationRegistryService {
        StationRegistryService::new(store)
    }

    fn in_memory_service() -> StationRegistryService {
        StationRegistryService::new(Arc::new(InMemoryStorage::new()))
    }

    fn main_st() -> Station {
        Station::new("Main St", Some("Downtown".into()), StationStatus::Available)
    }

    #[tokio::test]
    async fn create_and_update_reject_blank_names_without_touching_store() {
        let store = Arc::new(ProbeStore::new(false));
        let service = service_with(store.clone());

        for name in ["", "   ", "\t\n"] {
            let err = service
                .create(Station::new(name, None, StationStatus::Available))
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput { operation: "create", .. }));

            let mut station = Station::new(name, None, StationStatus::Available);
            station.id = 1;
            let err = service.update(station).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput { operation: "update", .. }));
        }

        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn update_rejects_unassigned_id() {
        let store = Arc::new(ProbeStore::new(false));
        let service = service_with(store.clone());

        let err = service.update(main_st()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { .. }));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn delete_validates_id_and_reports_missing_as_false() {
        let store = Arc::new(ProbeStore::new(false));
        let service = service_with(store.clone());

        for id in [0, -1] {
            let err = service.delete(id).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput { operation: "delete", .. }));
        }
        assert_eq!(store.calls(), 0);

        assert!(!service.delete(77).await.unwrap());
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn find_by_id_non_positive_is_absent_without_store_call() {
        let store = Arc::new(ProbeStore::new(false));
        let service = service_with(store.clone());

        assert!(service.find_by_id(0).await.unwrap().is_none());
        assert!(service.find_by_id(-5).await.unwrap().is_none());
        assert_eq!(store.calls(), 0);

        assert!(service.find_by_id(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_status_of_missing_station_is_not_found() {
        let service = in_memory_service();

        let err = service
            .update_status(12, StationStatus::Charging)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Station", .. }));

        let err = service
            .update_status(0, StationStatus::Charging)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn update_status_changes_only_status() {
        let service = in_memory_service();
        let created = service.create(main_st()).await.unwrap();

        assert!(service
            .update_status(created.id, StationStatus::OutOfService)
            .await
            .unwrap());

        let stored = service.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.status, StationStatus::OutOfService);
        assert_eq!(stored.name, created.name);
        assert_eq!(stored.location, created.location);
    }

    #[tokio::test]
    async fn blank_search_equals_find_all() {
        let service = in_memory_service();
        for name in ["Zeta", "alpha", "Main St"] {
            service
                .create(Station::new(name, None, StationStatus::Charging))
                .await
                .unwrap();
        }

        let all = service.find_all().await;
        assert_eq!(all.len(), 3);
        assert_eq!(service.search("").await, all);
        assert_eq!(service.search("   ").await, all);
        assert!(service.search("nothing like this").await.is_empty());
    }

    #[tokio::test]
    async fn statistics_counts_loaded_stations() {
        let service = in_memory_service();
        for (name, status) in [
            ("A", StationStatus::Available),
            ("B", StationStatus::Charging),
            ("C", StationStatus::OutOfService),
            ("D", StationStatus::Available),
        ] {
            service
                .create(Station::new(name, None, status))
                .await
                .unwrap();
        }

        let stats = service.statistics().await;
        assert_eq!(stats.available, 2);
        assert_eq!(stats.charging, 1);
        assert_eq!(stats.out_of_service, 1);
        assert_eq!(stats.total, 4);
    }

    #[tokio::test]
    async fn failing_store_is_soft_for_reads_and_loud_for_writes() {
        let store = Arc::new(ProbeStore::new(true));
        let service = service_with(store.clone());

        assert!(service.find_all().await.is_empty());
        assert!(service.search("main").await.is_empty());
        assert_eq!(service.statistics().await.total, 0);

        let err = service.create(main_st()).await.unwrap_err();
        assert!(err.is_storage_failure());
        assert_eq!(err.operation(), Some("insert"));

        let err = service.delete(1).await.unwrap_err();
        assert!(err.is_storage_failure());

        let err = service
            .update_status(1, StationStatus::Charging)
            .await
            .unwrap_err();
        assert!(err.is_storage_failure());

        let mut station = main_st();
        station.id = 1;
        let err = service.update(station).await.unwrap_err();
        assert!(err.is_storage_failure());
        assert_eq!(err.operation(), Some("update"));
    }

    #[tokio::test]
    async fn update_status_surfaces_failure_of_the_write_step() {
        let store = Arc::new(ProbeStore::failing_on("update"));
        let saved = store.inner.insert(main_st()).await.unwrap();
        let service = service_with(store.clone());

        let err = service
            .update_status(saved.id, StationStatus::Charging)
            .await
            .unwrap_err();
        assert!(err.is_storage_failure());
        assert_eq!(err.operation(), Some("update"));
        assert_eq!(store.calls(), 2);

        let unchanged = store.inner.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, StationStatus::Available);
    }

    #[tokio::test]
    async fn update_of_missing_positive_id_is_false() {
        let store = Arc::new(ProbeStore::new(false));
        let service = service_with(store.clone());

        let mut ghost = main_st();
        ghost.id = 404;
        assert!(!service.update(ghost).await.unwrap());
        assert_eq!(store.calls(), 1);
        assert!(service.find_all().await.is_empty());
    }

    #[tokio::test]
    async fn end_to_end_lifecycle() {
        let service = in_memory_service();

        let created = service.create(main_st()).await.unwrap();
        assert!(created.id > 0);

        let found = service.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Main St");
        assert!(found.last_updated.is_some());

        assert!(service
            .update_status(created.id, StationStatus::Charging)
            .await
            .unwrap());
        let found = service.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.status, StationStatus::Charging);

        assert!(service.delete(created.id).await.unwrap());
        assert!(service.find_by_id(created.id).await.unwrap().is_none());
    }
}
