//! In-memory storage implementation

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, RepositoryProvider, Station, StationRepository,
    User, UserRepository,
};

/// In-memory storage for development and testing.
///
/// Mirrors the SeaORM repositories: ids start at 1, every write stamps
/// `last_updated`, listings are ordered by name ignoring case.
pub struct InMemoryStorage {
    stations: DashMap<i64, Station>,
    users: DashMap<String, User>,
    station_counter: AtomicI64,
    user_counter: AtomicI64,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            stations: DashMap::new(),
            users: DashMap::new(),
            station_counter: AtomicI64::new(1),
            user_counter: AtomicI64::new(1),
        }
    }

    fn sorted(mut stations: Vec<Station>) -> Vec<Station> {
        stations.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        stations
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StationRepository for InMemoryStorage {
    async fn insert(&self, mut station: Station) -> DomainResult<Station> {
        station.id = self.station_counter.fetch_add(1, Ordering::SeqCst);
        station.last_updated = Some(Utc::now());
        self.stations.insert(station.id, station.clone());
        Ok(station)
    }

    async fn update(&self, mut station: Station) -> DomainResult<bool> {
        match self.stations.get_mut(&station.id) {
            Some(mut existing) => {
                station.last_updated = Some(Utc::now());
                *existing = station;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        Ok(self.stations.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Station>> {
        Ok(self.stations.get(&id).map(|s| s.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Station>> {
        Ok(Self::sorted(
            self.stations.iter().map(|e| e.value().clone()).collect(),
        ))
    }

    async fn search(&self, pattern: &str) -> DomainResult<Vec<Station>> {
        let needle = pattern.to_lowercase();
        Ok(Self::sorted(
            self.stations
                .iter()
                .filter(|e| e.value().matches_text(&needle))
                .map(|e| e.value().clone())
                .collect(),
        ))
    }
}

#[async_trait]
impl UserRepository for InMemoryStorage {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(username).map(|u| u.clone()))
    }

    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        if self.users.contains_key(&dto.username) {
            return Err(DomainError::invalid_input(
                "create_user",
                "username already exists",
            ));
        }
        let user = User {
            id: self.user_counter.fetch_add(1, Ordering::SeqCst),
            username: dto.username,
            password_hash: dto.password_hash,
        };
        self.users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn count_users(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn stations(&self) -> &dyn StationRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }
}
