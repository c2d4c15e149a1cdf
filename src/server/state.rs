//! Application state shared across HTTP handlers
//!
//! The event store and broadcaster are explicitly constructed here and owned
//! for the lifetime of the process; handlers receive them through
//! `web::Data` rather than ambient globals.

use std::sync::Arc;

use crate::config::Config;
use crate::core::events::{Broadcaster, EventStore};

/// HTTP server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Relay configuration (shared read-only)
    pub config: Arc<Config>,
    /// Bounded in-memory event store
    pub store: Arc<EventStore>,
    /// WebSocket fan-out registry
    pub broadcaster: Arc<Broadcaster>,
}

impl AppState {
    /// Create a new AppState with fresh shared resources
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(EventStore::new()),
            broadcaster: Arc::new(Broadcaster::new()),
        }
    }

    /// Get relay configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
