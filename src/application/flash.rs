//! Flash notifications
//!
//! Messages queued for a customer's next rendered page, then dropped.
//! Pull-based rather than broadcast: the consumer is the next render
//! request, not a live connection.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

/// In-process flash queue keyed by customer id
#[derive(Clone, Default)]
pub struct FlashStore {
    inner: Arc<DashMap<i32, Vec<FlashMessage>>>,
}

impl FlashStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self, customer_id: i32, level: FlashLevel, message: impl Into<String>) {
        self.inner.entry(customer_id).or_default().push(FlashMessage {
            level,
            message: message.into(),
        });
    }

    /// Take all pending messages for a customer, leaving none behind
    pub fn drain(&self, customer_id: i32) -> Vec<FlashMessage> {
        self.inner
            .remove(&customer_id)
            .map(|(_, messages)| messages)
            .unwrap_or_default()
    }

    pub fn pending(&self, customer_id: i32) -> usize {
        self.inner.get(&customer_id).map(|m| m.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_queue() {
        let store = FlashStore::new();
        store.queue(1, FlashLevel::Success, "done");
        store.queue(1, FlashLevel::Error, "oops");
        assert_eq!(store.pending(1), 2);

        let messages = store.drain(1);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].level, FlashLevel::Success);
        assert_eq!(store.pending(1), 0);
        assert!(store.drain(1).is_empty());
    }

    #[test]
    fn queues_are_per_customer() {
        let store = FlashStore::new();
        store.queue(1, FlashLevel::Success, "mine");
        assert!(store.drain(2).is_empty());
        assert_eq!(store.pending(1), 1);
    }
}
