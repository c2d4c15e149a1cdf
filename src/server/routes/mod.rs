//! HTTP route modules
//!
//! Route handlers organized by functionality: health checks, the event
//! query API and the chainhook webhook endpoints.

pub mod events;
pub mod health;
pub mod webhook;

/// Acknowledgement returned for accepted webhook deliveries
#[derive(Debug, Clone, serde::Serialize)]
pub struct AckResponse {
    /// Whether the delivery was processed
    pub success: bool,
}

impl AckResponse {
    /// A processed delivery
    pub fn ok() -> Self {
        Self { success: true }
    }
}
