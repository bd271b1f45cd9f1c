//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::station::StationRepository;
use crate::domain::user::UserRepository;

use super::station_repository::SeaOrmStationRepository;
use super::user_repository::SeaOrmUserRepository;

/// Repository provider backed by SeaORM.
///
/// Shares one connection pool between the per-aggregate repositories.
/// The pool is released when every clone of the connection is dropped or closed.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let station = repos.stations().find_by_id(42).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    stations: SeaOrmStationRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            stations: SeaOrmStationRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn stations(&self) -> &dyn StationRepository {
        &self.stations
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
