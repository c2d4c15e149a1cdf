//! Bounded in-memory event store
//!
//! Process-lifetime only: created at startup, never persisted, fully lost on
//! restart. Holds at most [`STORE_CAPACITY`] events, newest first.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use super::types::LottoEvent;

/// Maximum number of events retained
pub const STORE_CAPACITY: usize = 500;

/// Hard cap on how many events a single read may return
pub const RECENT_HARD_CAP: usize = 100;

/// Fixed-capacity, newest-first event store
///
/// actix runs handlers on parallel worker threads, so reads and writes are
/// mutually exclusive behind a single lock; there is no read/write asymmetry
/// worth optimizing here. Also owns the process-local sequence counter used
/// to disambiguate event ids.
pub struct EventStore {
    capacity: usize,
    events: RwLock<VecDeque<LottoEvent>>,
    seq: AtomicU64,
}

impl EventStore {
    /// Create a store with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(STORE_CAPACITY)
    }

    /// Create a store with an explicit capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            events: RwLock::new(VecDeque::with_capacity(capacity)),
            seq: AtomicU64::new(0),
        }
    }

    /// Next value of the process-local sequence counter
    pub fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Insert at the head, evicting from the tail beyond capacity.
    ///
    /// Events are never mutated after insertion.
    pub async fn append(&self, event: LottoEvent) {
        let mut events = self.events.write().await;
        events.push_front(event);
        while events.len() > self.capacity {
            events.pop_back();
        }
    }

    /// Up to `min(limit, RECENT_HARD_CAP, stored)` newest events, newest first
    pub async fn recent(&self, limit: usize) -> Vec<LottoEvent> {
        let limit = limit.min(RECENT_HARD_CAP);
        let events = self.events.read().await;
        events.iter().take(limit).cloned().collect()
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::types::EventKind;
    use chrono::Utc;

    fn event(n: u64) -> LottoEvent {
        LottoEvent {
            id: format!("0xabc-{}", n),
            kind: EventKind::TicketPurchase,
            player: None,
            round: Some(n),
            ticket_count: None,
            winner: None,
            prize: None,
            transaction_id: None,
            block_height: None,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_append_keeps_newest_first() {
        let store = EventStore::new();
        for n in 0..5 {
            store.append(event(n)).await;
        }
        let recent = store.recent(10).await;
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].round, Some(4));
        assert_eq!(recent[4].round, Some(0));
    }

    #[tokio::test]
    async fn test_capacity_is_never_exceeded() {
        let store = EventStore::with_capacity(3);
        for n in 0..10 {
            store.append(event(n)).await;
            assert!(store.len().await <= 3);
        }
        let recent = store.recent(10).await;
        assert_eq!(recent.len(), 3);
        // Oldest entries were evicted from the tail
        assert_eq!(recent[0].round, Some(9));
        assert_eq!(recent[2].round, Some(7));
    }

    #[tokio::test]
    async fn test_recent_clamps_to_hard_cap() {
        let store = EventStore::new();
        for n in 0..150 {
            store.append(event(n)).await;
        }
        assert_eq!(store.recent(1000).await.len(), RECENT_HARD_CAP);
        assert_eq!(store.recent(20).await.len(), 20);
    }

    #[tokio::test]
    async fn test_recent_on_empty_store() {
        let store = EventStore::new();
        assert!(store.recent(50).await.is_empty());
        assert!(store.is_empty().await);
    }

    #[test]
    fn test_sequence_counter_is_monotonic() {
        let store = EventStore::new();
        let a = store.next_seq();
        let b = store.next_seq();
        assert!(b > a);
    }
}
