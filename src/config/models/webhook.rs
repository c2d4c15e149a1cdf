//! Webhook authentication configuration

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Shared-secret configuration for inbound webhook deliveries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Shared secret expected as a bearer header or `token` query parameter.
    /// Empty means permissive mode: every delivery is accepted.
    #[serde(default)]
    pub secret: String,
}

impl WebhookConfig {
    /// Load from the `WEBHOOK_SECRET` environment variable
    pub fn from_env() -> Self {
        let secret = std::env::var("WEBHOOK_SECRET").unwrap_or_default();
        if secret.is_empty() {
            warn!("WEBHOOK_SECRET not set, accepting unauthenticated webhook deliveries");
        }
        Self { secret }
    }

    /// Whether deliveries are accepted without credentials
    pub fn is_permissive(&self) -> bool {
        self.secret.is_empty()
    }
}
