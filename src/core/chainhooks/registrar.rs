//! Hook registrar
//!
//! One-shot reconciliation of the desired chainhook subscriptions against
//! the provider's current state: create what is missing, update hooks whose
//! delivery URL drifted, leave the rest untouched. Per-hook failures are
//! logged and skipped; one failure never aborts the remaining hooks.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::{ChainhookConfig, HookStrategy};
use crate::utils::error::Result;

use super::client::{ChainhookApi, HttpChainhooksClient};
use super::types::{ChainhookDefinition, ChainhookList, EventFilter, HookAction, HookFilters, HookOptions};

/// Provider-side maximum number of registered hooks per account
pub const PROVIDER_HOOK_LIMIT: usize = 10;

/// Naming prefix identifying hooks owned by this application
pub const HOOK_NAME_PREFIX: &str = "StacksLotto-";

/// One subscription we want the provider to hold
#[derive(Debug, Clone)]
pub struct DesiredHook {
    pub name: String,
    /// `None` for contract-wide catch-all hooks
    pub function_name: Option<String>,
    /// Path appended to the webhook base URL
    pub endpoint: String,
}

/// Outcome counters from one reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub pruned: usize,
    pub skipped: usize,
}

/// Reconciles desired subscriptions against the provider
pub struct HookRegistrar {
    api: Arc<dyn ChainhookApi>,
    config: ChainhookConfig,
}

impl HookRegistrar {
    /// Create a registrar over an explicit API implementation
    pub fn new(api: Arc<dyn ChainhookApi>, config: ChainhookConfig) -> Self {
        Self { api, config }
    }

    /// Build a registrar from configuration.
    ///
    /// Returns `None` when no API key is configured or when the contract
    /// identifier is missing; both are explicit opt-outs, not failures.
    pub fn from_config(config: &ChainhookConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return Ok(None);
        };
        if config.contract.is_empty() {
            warn!("LOTTO_CONTRACT not set, skipping chainhook registration");
            return Ok(None);
        }

        let client = HttpChainhooksClient::new(config.network, api_key)?;
        Ok(Some(Self::new(Arc::new(client), config.clone())))
    }

    /// Desired subscriptions under the configured strategy
    pub fn desired_hooks(&self) -> Vec<DesiredHook> {
        match self.config.strategy {
            HookStrategy::PerFunction => per_function_hooks(),
            HookStrategy::CatchAll => vec![DesiredHook {
                name: format!("{}All", HOOK_NAME_PREFIX),
                function_name: None,
                endpoint: String::new(),
            }],
        }
    }

    /// Run one reconciliation pass
    pub async fn reconcile(&self) -> Result<ReconcileSummary> {
        match self.api.status().await {
            Ok(status) => info!(
                "Provider API status: {} (server {})",
                status.status.as_deref().unwrap_or("unknown"),
                status.server_version.as_deref().unwrap_or("unknown"),
            ),
            Err(e) => debug!("Could not fetch provider API status: {}", e),
        }

        let mut summary = ReconcileSummary::default();

        if self.config.prune_foreign {
            summary.pruned = self.prune_foreign_hooks().await?;
        }

        let existing = self.api.list().await?;
        info!("Provider holds {} registered chainhook(s)", existing.total);

        let mut count = existing.results.len();

        for desired in self.desired_hooks() {
            let found = existing.results.iter().find(|h| h.name() == desired.name);

            match found {
                Some(record) => {
                    let expected_url = self.config.endpoint_url(&desired.endpoint);
                    if record.action_url() == Some(expected_url.as_str()) {
                        debug!("Hook {} already up to date ({})", desired.name, record.uuid);
                        summary.unchanged += 1;
                        continue;
                    }

                    let action = HookAction::http_post(expected_url.clone());
                    match self.api.update_action(&record.uuid, &action).await {
                        Ok(()) => {
                            info!("Updated {} delivery URL to {}", desired.name, expected_url);
                            summary.updated += 1;
                        }
                        Err(e) => {
                            error!("Failed to update {}: {}", desired.name, e);
                            summary.skipped += 1;
                        }
                    }
                }
                None => {
                    if count >= PROVIDER_HOOK_LIMIT {
                        warn!(
                            "Chainhook limit reached ({}/{}), cannot register {}",
                            count, PROVIDER_HOOK_LIMIT, desired.name
                        );
                        summary.skipped += 1;
                        continue;
                    }

                    let definition = self.definition_for(&desired);
                    match self.api.register(&definition).await {
                        Ok(response) => {
                            info!("Registered {}: {}", desired.name, response.uuid);
                            summary.created += 1;
                            count += 1;
                        }
                        Err(e) => {
                            error!("Failed to register {}: {}", desired.name, e);
                            summary.skipped += 1;
                        }
                    }
                }
            }
        }

        Ok(summary)
    }

    /// List the provider's registered hooks
    pub async fn list(&self) -> Result<ChainhookList> {
        self.api.list().await
    }

    /// Delete every registered hook, regardless of ownership
    pub async fn delete_all(&self) -> Result<usize> {
        let existing = self.api.list().await?;
        let mut deleted = 0;
        for record in existing.results {
            match self.api.delete(&record.uuid).await {
                Ok(()) => {
                    info!("Deleted hook {} ({})", record.name(), record.uuid);
                    deleted += 1;
                }
                Err(e) => error!("Failed to delete {}: {}", record.uuid, e),
            }
        }
        Ok(deleted)
    }

    /// Delete hooks outside our naming prefix to reclaim capacity
    async fn prune_foreign_hooks(&self) -> Result<usize> {
        let existing = self.api.list().await?;
        let mut pruned = 0;

        for record in &existing.results {
            if record.name().starts_with(HOOK_NAME_PREFIX) {
                continue;
            }
            match self.api.delete(&record.uuid).await {
                Ok(()) => {
                    info!("Pruned foreign hook {} ({})", record.name(), record.uuid);
                    pruned += 1;
                }
                Err(e) => error!("Failed to prune {}: {}", record.uuid, e),
            }
        }

        Ok(pruned)
    }

    fn definition_for(&self, desired: &DesiredHook) -> ChainhookDefinition {
        ChainhookDefinition {
            name: desired.name.clone(),
            version: "1".to_string(),
            chain: "stacks".to_string(),
            network: self.config.network.as_str().to_string(),
            filters: HookFilters {
                events: vec![EventFilter {
                    kind: "contract_call".to_string(),
                    contract_identifier: self.config.contract.clone(),
                    function_name: desired.function_name.clone(),
                }],
            },
            action: HookAction::http_post(self.config.endpoint_url(&desired.endpoint)),
            options: HookOptions::default(),
        }
    }
}

/// One hook per tracked contract function
fn per_function_hooks() -> Vec<DesiredHook> {
    let hooks = [
        ("TicketPurchase", "buy-ticket", "/ticket-purchase"),
        ("QuickPlay", "quick-play", "/ticket-purchase"),
        ("BulkTickets", "buy-tickets", "/bulk-tickets"),
        ("LuckyFive", "lucky-five", "/bulk-tickets"),
        ("PowerPlay", "power-play", "/bulk-tickets"),
        ("MegaPlay", "mega-play", "/bulk-tickets"),
        ("WinnerDrawn", "draw-winner", "/winner-drawn"),
        ("LotteryPaused", "pause-lottery", "/lottery-paused"),
        ("LotteryResumed", "resume-lottery", "/lottery-resumed"),
    ];

    hooks
        .into_iter()
        .map(|(suffix, function, endpoint)| DesiredHook {
            name: format!("{}{}", HOOK_NAME_PREFIX, suffix),
            function_name: Some(function.to_string()),
            endpoint: endpoint.to_string(),
        })
        .collect()
}
