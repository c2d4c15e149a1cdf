//! Configuration management for the relay
//!
//! Configuration is environment-based (a `.env` file is honored in
//! development). The provider API key is optional: without it the hook
//! registrar is skipped while the ingestion endpoints stay active.

pub mod models;

pub use models::*;

use crate::utils::error::{RelayError, Result};
use tracing::debug;

/// Main configuration struct for the relay
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Webhook authentication configuration
    pub webhook: WebhookConfig,
    /// Chainhook provider configuration
    pub chainhook: ChainhookConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            server: ServerConfig::from_env()?,
            webhook: WebhookConfig::from_env(),
            chainhook: ChainhookConfig::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get webhook authentication configuration
    pub fn webhook(&self) -> &WebhookConfig {
        &self.webhook
    }

    /// Get chainhook provider configuration
    pub fn chainhook(&self) -> &ChainhookConfig {
        &self.chainhook
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| RelayError::Config(format!("Server config error: {}", e)))?;

        self.chainhook
            .validate()
            .map_err(|e| RelayError::Config(format!("Chainhook config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}
