//! Location repository interface

use async_trait::async_trait;

use super::model::{DiningTable, Location};
use crate::domain::DomainResult;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Find location by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Location>>;

    /// Find dining table by ID
    async fn find_table_by_id(&self, id: i32) -> DomainResult<Option<DiningTable>>;

    /// All active locations
    async fn find_active(&self) -> DomainResult<Vec<Location>>;
}
