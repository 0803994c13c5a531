//! SeaORM implementation of LocationRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::location::{DiningTable, Location, LocationRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{dining_table, location};

use super::reservation_repository::{location_to_domain, table_to_domain};

pub struct SeaOrmLocationRepository {
    db: DatabaseConnection,
}

impl SeaOrmLocationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

#[async_trait]
impl LocationRepository for SeaOrmLocationRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Location>> {
        let model = location::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(location_to_domain))
    }

    async fn find_table_by_id(&self, id: i32) -> DomainResult<Option<DiningTable>> {
        let model = dining_table::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(table_to_domain))
    }

    async fn find_active(&self) -> DomainResult<Vec<Location>> {
        let models = location::Entity::find()
            .filter(location::Column::IsActive.eq(true))
            .order_by_asc(location::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(location_to_domain).collect())
    }
}
