//! Create dining_tables table

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_locations::Locations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiningTables::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiningTables::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DiningTables::LocationId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DiningTables::Name).string().not_null())
                    .col(
                        ColumnDef::new(DiningTables::MinCapacity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(DiningTables::MaxCapacity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DiningTables::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dining_tables_location")
                            .from(DiningTables::Table, DiningTables::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiningTables::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum DiningTables {
    Table,
    Id,
    LocationId,
    Name,
    MinCapacity,
    MaxCapacity,
    IsActive,
}
