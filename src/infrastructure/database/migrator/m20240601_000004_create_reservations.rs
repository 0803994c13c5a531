//! Create reservations table
//!
//! Stores table reservations with their customer-facing lookup hash.
//! The hash substitutes for the numeric id in URLs, so it gets a unique
//! index; listings filter by customer, so customer_id is indexed too.

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_locations::Locations;
use super::m20240601_000002_create_customers::Customers;
use super::m20240601_000003_create_dining_tables::DiningTables;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Reservations::Hash)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Reservations::CustomerId).integer())
                    .col(
                        ColumnDef::new(Reservations::LocationId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::TableId).integer())
                    .col(
                        ColumnDef::new(Reservations::GuestNum)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(ColumnDef::new(Reservations::FirstName).string().not_null())
                    .col(ColumnDef::new(Reservations::LastName).string().not_null())
                    .col(ColumnDef::new(Reservations::Email).string().not_null())
                    .col(ColumnDef::new(Reservations::Telephone).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::ReserveAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_customer")
                            .from(Reservations::Table, Reservations::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_location")
                            .from(Reservations::Table, Reservations::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_table")
                            .from(Reservations::Table, Reservations::TableId)
                            .to(DiningTables::Table, DiningTables::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_customer_id")
                    .table(Reservations::Table)
                    .col(Reservations::CustomerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Reservations {
    Table,
    Id,
    Hash,
    CustomerId,
    LocationId,
    TableId,
    GuestNum,
    FirstName,
    LastName,
    Email,
    Telephone,
    ReserveAt,
    Status,
    CreatedAt,
    UpdatedAt,
}
