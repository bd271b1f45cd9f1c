//! Create stations table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Stations::Name).string().not_null())
                    .col(ColumnDef::new(Stations::Location).string())
                    .col(ColumnDef::new(Stations::NameKey).string().not_null())
                    .col(ColumnDef::new(Stations::LocationKey).string())
                    .col(
                        ColumnDef::new(Stations::Status)
                            .string()
                            .not_null()
                            .default("OUT_OF_SERVICE"),
                    )
                    .col(
                        ColumnDef::new(Stations::LastUpdated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stations_name_key")
                    .table(Stations::Table)
                    .col(Stations::NameKey)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Stations {
    Table,
    Id,
    Name,
    Location,
    /// Unicode-lowercased `name`, for search and ordering
    NameKey,
    /// Unicode-lowercased `location`
    LocationKey,
    Status,
    LastUpdated,
}
