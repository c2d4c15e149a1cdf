//! WebSocket fan-out
//!
//! Keeps the set of live subscriber sessions and pushes each ingested event
//! to all of them, best effort. Sessions whose send fails are dropped from
//! the set and never retried.

use actix_ws::Session;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use super::types::{LottoEvent, SocketMessage};

/// Maximum number of events replayed to a newly connected subscriber
pub const REPLAY_LIMIT: usize = 50;

/// Fan-out registry of live WebSocket sessions
#[derive(Default)]
pub struct Broadcaster {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl Broadcaster {
    /// Create an empty broadcaster
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Add a session to the broadcast set
    pub async fn subscribe(&self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, session);
        id
    }

    /// Remove a session from the broadcast set
    pub async fn unsubscribe(&self, id: Uuid) {
        self.sessions.write().await.remove(&id);
    }

    /// Number of live subscribers
    pub async fn subscriber_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Push one event to every live subscriber.
    ///
    /// At-most-once per open channel; closed channels are removed on the
    /// first failed send. Returns the number of successful deliveries.
    pub async fn publish(&self, event: &LottoEvent) -> usize {
        let message = SocketMessage::NewEvent {
            event: event.clone(),
        };
        let text = match serde_json::to_string(&message) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to serialize event for broadcast: {}", e);
                return 0;
            }
        };

        let mut sessions = self.sessions.write().await;
        let mut closed = Vec::new();
        let mut delivered = 0;

        for (id, session) in sessions.iter_mut() {
            if session.text(text.clone()).await.is_err() {
                closed.push(*id);
            } else {
                delivered += 1;
            }
        }

        for id in closed {
            sessions.remove(&id);
            debug!(connection = %id, "Dropped closed websocket session");
        }

        delivered
    }
}
