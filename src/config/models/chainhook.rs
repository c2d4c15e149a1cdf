//! Chainhook provider configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::{RelayError, Result};

/// Stacks network the provider watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StacksNetwork {
    #[default]
    Mainnet,
    Testnet,
}

impl StacksNetwork {
    /// Network name as the provider API expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            StacksNetwork::Mainnet => "mainnet",
            StacksNetwork::Testnet => "testnet",
        }
    }
}

impl FromStr for StacksNetwork {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(StacksNetwork::Mainnet),
            "testnet" => Ok(StacksNetwork::Testnet),
            other => Err(format!("unknown Stacks network: {}", other)),
        }
    }
}

impl fmt::Display for StacksNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hook registration strategy
///
/// The provider can be told to deliver either one hook per tracked contract
/// function (each targeting its own ingestion path) or a single catch-all
/// hook for the whole contract targeting the consolidated endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookStrategy {
    #[default]
    PerFunction,
    CatchAll,
}

impl FromStr for HookStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "per-function" => Ok(HookStrategy::PerFunction),
            "catch-all" => Ok(HookStrategy::CatchAll),
            other => Err(format!("unknown hook strategy: {}", other)),
        }
    }
}

/// Configuration for the external chainhook provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainhookConfig {
    /// Provider API key. Absent means the registrar is skipped entirely;
    /// ingestion endpoints stay active regardless.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Network selector
    #[serde(default)]
    pub network: StacksNetwork,
    /// Fully qualified lottery contract identifier
    #[serde(default)]
    pub contract: String,
    /// Externally reachable base URL for the ingestion endpoints
    #[serde(default = "default_webhook_base_url")]
    pub webhook_base_url: String,
    /// Registration strategy
    #[serde(default)]
    pub strategy: HookStrategy,
    /// Delete provider hooks outside our naming prefix to reclaim capacity
    #[serde(default)]
    pub prune_foreign: bool,
}

impl Default for ChainhookConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            network: StacksNetwork::default(),
            contract: String::new(),
            webhook_base_url: default_webhook_base_url(),
            strategy: HookStrategy::default(),
            prune_foreign: false,
        }
    }
}

impl ChainhookConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("HIRO_API_KEY").ok().filter(|k| !k.is_empty());

        let network = match std::env::var("STACKS_NETWORK") {
            Ok(raw) => raw.parse().map_err(RelayError::Config)?,
            Err(_) => StacksNetwork::default(),
        };

        let strategy = match std::env::var("HOOK_STRATEGY") {
            Ok(raw) => raw.parse().map_err(RelayError::Config)?,
            Err(_) => HookStrategy::default(),
        };

        let prune_foreign = std::env::var("PRUNE_FOREIGN_HOOKS")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            api_key,
            network,
            contract: std::env::var("LOTTO_CONTRACT").unwrap_or_default(),
            webhook_base_url: std::env::var("WEBHOOK_URL")
                .unwrap_or_else(|_| default_webhook_base_url()),
            strategy,
            prune_foreign,
        })
    }

    /// Whether the registrar should run at all
    pub fn registrar_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Join an ingestion path onto the webhook base URL
    pub fn endpoint_url(&self, path: &str) -> String {
        let base = self.webhook_base_url.trim_end_matches('/');
        if path.is_empty() {
            return base.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Validate chainhook configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.registrar_enabled() && self.webhook_base_url.is_empty() {
            return Err("WEBHOOK_URL is required when HIRO_API_KEY is set".to_string());
        }
        Ok(())
    }
}

fn default_webhook_base_url() -> String {
    "http://localhost:3001/api/chainhook/events".to_string()
}
