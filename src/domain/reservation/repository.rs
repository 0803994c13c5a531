//! Reservation repository interface

use async_trait::async_trait;

use super::model::{Reservation, ReservationWithRelations};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

/// Listing sort order. Parsed from configuration against an allow-list so a
/// config typo cannot inject arbitrary SQL expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    CreatedAtDesc,
    CreatedAtAsc,
    ReserveAtDesc,
    ReserveAtAsc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "created_at desc" => Some(Self::CreatedAtDesc),
            "created_at asc" => Some(Self::CreatedAtAsc),
            "reserve_at desc" => Some(Self::ReserveAtDesc),
            "reserve_at asc" => Some(Self::ReserveAtAsc),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation, assigning its id
    async fn create(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// Find a reservation by its lookup hash, with relations.
    ///
    /// When `customer_id` is given the match is additionally scoped to that
    /// owner; a correct hash belonging to someone else resolves to `None`.
    async fn find_by_hash(
        &self,
        hash: &str,
        customer_id: Option<i32>,
    ) -> DomainResult<Option<ReservationWithRelations>>;

    /// One page of a customer's reservations, relations eagerly loaded
    async fn list_for_customer(
        &self,
        customer_id: i32,
        page: u32,
        limit: u32,
        sort: SortOrder,
    ) -> DomainResult<PaginatedResult<ReservationWithRelations>>;

    /// Guarded transition to Canceled.
    ///
    /// Returns `true` only when this call performed the transition. The
    /// guard (`status != Canceled`) makes two racing cancels resolve to at
    /// most one success.
    async fn mark_as_canceled(&self, id: i32) -> DomainResult<bool>;
}
