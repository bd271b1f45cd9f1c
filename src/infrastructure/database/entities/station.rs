//! Station entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    #[sea_orm(nullable)]
    pub location: Option<String>,

    /// Lowercased copy of `name`. SQLite `LOWER()` only folds ASCII.
    pub name_key: String,

    #[sea_orm(nullable)]
    pub location_key: Option<String>,

    /// Status token: AVAILABLE, CHARGING, OUT_OF_SERVICE
    pub status: String,

    pub last_updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
