//! SeaORM implementation of StationRepository

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::sea_query::{Condition, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use crate::domain::station::{Station, StationRepository, StationStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::station;

pub struct SeaOrmStationRepository {
    db: DatabaseConnection,
}

impl SeaOrmStationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(operation: &'static str) -> impl Fn(sea_orm::DbErr) -> DomainError {
    move |e| DomainError::storage(operation, e)
}

fn station_from_model(model: station::Model) -> Station {
    Station {
        id: model.id,
        name: model.name,
        location: model.location,
        status: StationStatus::parse(&model.status),
        last_updated: Some(model.last_updated),
    }
}

/// Every write stores Unicode-lowercased copies of name and location; search
/// and ordering run on those, never on SQL `LOWER()`.
fn active_model(station: Station) -> station::ActiveModel {
    station::ActiveModel {
        id: NotSet,
        name_key: Set(station.name.to_lowercase()),
        location_key: Set(station.location.as_deref().map(str::to_lowercase)),
        name: Set(station.name),
        location: Set(station.location),
        status: Set(station.status.storage_token().to_string()),
        last_updated: Set(Utc::now()),
    }
}

/// `%` `_` and `\` in user text match literally.
fn like_pattern(pattern: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(pattern.len() + 2);
    escaped.push('%');
    for c in pattern.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

/// Name ascending, ignoring case; ties broken by name then id.
fn ordered(query: Select<station::Entity>) -> Select<station::Entity> {
    query
        .order_by_asc(station::Column::NameKey)
        .order_by_asc(station::Column::Name)
        .order_by_asc(station::Column::Id)
}

// ── StationRepository impl ──────────────────────────────────────

#[async_trait]
impl StationRepository for SeaOrmStationRepository {
    async fn insert(&self, station: Station) -> DomainResult<Station> {
        debug!("Inserting station: {}", station.name);

        let inserted = active_model(station)
            .insert(&self.db).await.map_err(db_err("insert"))?;

        if inserted.id <= 0 {
            return Err(DomainError::storage(
                "insert",
                "generated station id could not be retrieved",
            ));
        }

        info!("Station inserted: {} ({})", inserted.id, inserted.name);
        Ok(station_from_model(inserted))
    }

    async fn update(&self, station: Station) -> DomainResult<bool> {
        debug!("Updating station: {}", station.id);

        let station_id = station.id;
        let result = station::Entity::update_many()
            .set(active_model(station))
            .filter(station::Column::Id.eq(station_id))
            .exec(&self.db)
            .await
            .map_err(db_err("update"))?;

        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let result = station::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("delete"))?;

        if result.rows_affected > 0 {
            info!("Station deleted: {}", id);
        }
        Ok(result.rows_affected > 0)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Station>> {
        let model = station::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("find_by_id"))?;

        Ok(model.map(station_from_model))
    }

    async fn find_all(&self) -> DomainResult<Vec<Station>> {
        let models = ordered(station::Entity::find())
            .all(&self.db)
            .await
            .map_err(db_err("find_all"))?;

        Ok(models.into_iter().map(station_from_model).collect())
    }

    async fn search(&self, pattern: &str) -> DomainResult<Vec<Station>> {
        let like = like_pattern(pattern);
        let condition = Condition::any()
            .add(station::Column::NameKey.like(like.clone()))
            .add(station::Column::LocationKey.like(like));

        let models = ordered(station::Entity::find().filter(condition))
            .all(&self.db)
            .await
            .map_err(db_err("search"))?;

        Ok(models.into_iter().map(station_from_model).collect())
    }
}
