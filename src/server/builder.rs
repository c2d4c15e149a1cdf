//! Server startup with automatic configuration loading

use tracing::{error, info};

use crate::config::Config;
use crate::core::chainhooks::HookRegistrar;
use crate::server::server::HttpServer;
use crate::utils::error::Result;

/// Run the relay with configuration loaded from the environment.
///
/// Hook reconciliation runs in the background so a slow or unreachable
/// provider never delays serving webhooks.
pub async fn run_server() -> Result<()> {
    info!("Starting StacksLotto event relay");

    let config = Config::from_env()?;
    info!(
        network = %config.chainhook().network,
        contract = %config.chainhook().contract,
        "Configuration loaded"
    );

    match HookRegistrar::from_config(config.chainhook())? {
        Some(registrar) => {
            tokio::spawn(async move {
                match registrar.reconcile().await {
                    Ok(summary) => info!(
                        created = summary.created,
                        updated = summary.updated,
                        unchanged = summary.unchanged,
                        pruned = summary.pruned,
                        skipped = summary.skipped,
                        "Chainhook reconciliation finished"
                    ),
                    Err(e) => error!("Chainhook reconciliation failed: {}", e),
                }
            });
        }
        None => {
            info!("Chainhook registrar disabled, serving webhook endpoints only");
        }
    }

    let server = HttpServer::new(&config);
    info!(
        "Relay starting at: http://{}",
        config.server().address()
    );

    server.start().await
}
