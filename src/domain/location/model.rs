//! Location and dining table domain entities

use chrono::{DateTime, Utc};

/// Restaurant location
#[derive(Debug, Clone)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub telephone: Option<String>,
    pub is_active: bool,
    /// Cancellation window in minutes before the reservation time.
    ///
    /// 0 means a reservation stays cancelable right up to its start.
    /// This is the externally-owned eligibility rule consulted by the
    /// cancel-button predicate.
    pub cancellation_timeout_mins: i64,
    pub created_at: DateTime<Utc>,
}

/// Dining table within a location
#[derive(Debug, Clone)]
pub struct DiningTable {
    pub id: i32,
    pub location_id: i32,
    pub name: String,
    pub min_capacity: i32,
    pub max_capacity: i32,
    pub is_active: bool,
}

impl DiningTable {
    /// Whether a party of `guest_num` fits this table
    pub fn fits(&self, guest_num: i32) -> bool {
        guest_num >= self.min_capacity && guest_num <= self.max_capacity
    }
}
