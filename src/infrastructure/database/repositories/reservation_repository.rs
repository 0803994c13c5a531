//! SeaORM implementation of ReservationRepository

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::location::{DiningTable, Location};
use crate::domain::reservation::{
    Reservation, ReservationRepository, ReservationStatus, ReservationWithRelations, SortOrder,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{dining_table, location, reservation};
use crate::shared::PaginatedResult;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        hash: m.hash,
        customer_id: m.customer_id,
        location_id: m.location_id,
        table_id: m.table_id,
        guest_num: m.guest_num,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        telephone: m.telephone,
        reserve_at: m.reserve_at,
        status: ReservationStatus::from_str(&m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub(crate) fn location_to_domain(m: location::Model) -> Location {
    Location {
        id: m.id,
        name: m.name,
        telephone: m.telephone,
        is_active: m.is_active,
        cancellation_timeout_mins: m.cancellation_timeout_mins,
        created_at: m.created_at,
    }
}

pub(crate) fn table_to_domain(m: dining_table::Model) -> DiningTable {
    DiningTable {
        id: m.id,
        location_id: m.location_id,
        name: m.name,
        min_capacity: m.min_capacity,
        max_capacity: m.max_capacity,
        is_active: m.is_active,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

impl SeaOrmReservationRepository {
    /// Batch-load locations and tables for a page of reservation rows
    async fn attach_relations(
        &self,
        models: Vec<reservation::Model>,
    ) -> DomainResult<Vec<ReservationWithRelations>> {
        let location_ids: HashSet<i32> = models.iter().map(|m| m.location_id).collect();
        let table_ids: HashSet<i32> = models.iter().filter_map(|m| m.table_id).collect();

        let locations: HashMap<i32, Location> = location::Entity::find()
            .filter(location::Column::Id.is_in(location_ids))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|m| (m.id, location_to_domain(m)))
            .collect();

        let tables: HashMap<i32, DiningTable> = if table_ids.is_empty() {
            HashMap::new()
        } else {
            dining_table::Entity::find()
                .filter(dining_table::Column::Id.is_in(table_ids))
                .all(&self.db)
                .await
                .map_err(db_err)?
                .into_iter()
                .map(|m| (m.id, table_to_domain(m)))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let location = locations.get(&m.location_id).cloned();
                let table = m.table_id.and_then(|id| tables.get(&id).cloned());
                ReservationWithRelations {
                    reservation: model_to_domain(m),
                    location,
                    table,
                }
            })
            .collect())
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create(&self, r: Reservation) -> DomainResult<Reservation> {
        debug!("Creating reservation with hash {}", r.hash);

        let model = reservation::ActiveModel {
            id: NotSet,
            hash: Set(r.hash),
            customer_id: Set(r.customer_id),
            location_id: Set(r.location_id),
            table_id: Set(r.table_id),
            guest_num: Set(r.guest_num),
            first_name: Set(r.first_name),
            last_name: Set(r.last_name),
            email: Set(r.email),
            telephone: Set(r.telephone),
            reserve_at: Set(r.reserve_at),
            status: Set(r.status.as_str().to_string()),
            created_at: Set(r.created_at),
            updated_at: Set(r.updated_at),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_hash(
        &self,
        hash: &str,
        customer_id: Option<i32>,
    ) -> DomainResult<Option<ReservationWithRelations>> {
        let mut query =
            reservation::Entity::find().filter(reservation::Column::Hash.eq(hash));
        if let Some(customer_id) = customer_id {
            query = query.filter(reservation::Column::CustomerId.eq(customer_id));
        }

        let model = query.one(&self.db).await.map_err(db_err)?;
        let Some(model) = model else {
            return Ok(None);
        };

        Ok(self.attach_relations(vec![model]).await?.into_iter().next())
    }

    async fn list_for_customer(
        &self,
        customer_id: i32,
        page: u32,
        limit: u32,
        sort: SortOrder,
    ) -> DomainResult<PaginatedResult<ReservationWithRelations>> {
        let query = reservation::Entity::find()
            .filter(reservation::Column::CustomerId.eq(customer_id));

        let query = match sort {
            SortOrder::CreatedAtDesc => query
                .order_by_desc(reservation::Column::CreatedAt)
                .order_by_desc(reservation::Column::Id),
            SortOrder::CreatedAtAsc => query
                .order_by_asc(reservation::Column::CreatedAt)
                .order_by_asc(reservation::Column::Id),
            SortOrder::ReserveAtDesc => query
                .order_by_desc(reservation::Column::ReserveAt)
                .order_by_desc(reservation::Column::Id),
            SortOrder::ReserveAtAsc => query
                .order_by_asc(reservation::Column::ReserveAt)
                .order_by_asc(reservation::Column::Id),
        };

        let paginator = query.paginate(&self.db, limit.max(1) as u64);
        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page((page.max(1) - 1) as u64)
            .await
            .map_err(db_err)?;

        let items = self.attach_relations(models).await?;
        Ok(PaginatedResult::new(items, total, page, limit))
    }

    async fn mark_as_canceled(&self, id: i32) -> DomainResult<bool> {
        debug!("Marking reservation {} as canceled", id);

        // Guarded update: only a non-canceled row transitions, so two
        // racing cancels resolve to at most one rows_affected == 1.
        let result = reservation::Entity::update_many()
            .col_expr(
                reservation::Column::Status,
                Expr::value(ReservationStatus::Canceled.as_str()),
            )
            .col_expr(reservation::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(reservation::Column::Id.eq(id))
            .filter(
                reservation::Column::Status.ne(ReservationStatus::Canceled.as_str()),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected == 1)
    }
}
