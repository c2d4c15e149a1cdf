//! Chainhook provider API client

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::StacksNetwork;
use crate::utils::error::Result;

use super::types::{ApiStatus, ChainhookDefinition, ChainhookList, HookAction, RegisterResponse};

const MAINNET_BASE_URL: &str = "https://api.hiro.so/v1/chainhooks";
const TESTNET_BASE_URL: &str = "https://api.testnet.hiro.so/v1/chainhooks";

/// Seam over the provider's subscription API.
///
/// The registrar only talks through this trait, which keeps reconciliation
/// testable without a live provider.
#[async_trait]
pub trait ChainhookApi: Send + Sync {
    /// Provider API status
    async fn status(&self) -> Result<ApiStatus>;
    /// List registered hooks
    async fn list(&self) -> Result<ChainhookList>;
    /// Register a new hook
    async fn register(&self, definition: &ChainhookDefinition) -> Result<RegisterResponse>;
    /// Update the delivery action of an existing hook
    async fn update_action(&self, uuid: &str, action: &HookAction) -> Result<()>;
    /// Delete a hook
    async fn delete(&self, uuid: &str) -> Result<()>;
}

/// HTTP implementation backed by the Hiro chainhooks API
pub struct HttpChainhooksClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpChainhooksClient {
    /// Create a client for the given network
    pub fn new(network: StacksNetwork, api_key: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let base_url = match network {
            StacksNetwork::Mainnet => MAINNET_BASE_URL,
            StacksNetwork::Testnet => TESTNET_BASE_URL,
        };

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ChainhookApi for HttpChainhooksClient {
    async fn status(&self) -> Result<ApiStatus> {
        let status = self
            .http
            .get(self.url("/status"))
            .header("x-api-key", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(status)
    }

    async fn list(&self) -> Result<ChainhookList> {
        let list = self
            .http
            .get(&self.base_url)
            .header("x-api-key", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(list)
    }

    async fn register(&self, definition: &ChainhookDefinition) -> Result<RegisterResponse> {
        let response = self
            .http
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .json(definition)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }

    async fn update_action(&self, uuid: &str, action: &HookAction) -> Result<()> {
        self.http
            .put(self.url(&format!("/{}", uuid)))
            .header("x-api-key", &self.api_key)
            .json(&serde_json::json!({ "action": action }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete(&self, uuid: &str) -> Result<()> {
        self.http
            .delete(self.url(&format!("/{}", uuid)))
            .header("x-api-key", &self.api_key)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
