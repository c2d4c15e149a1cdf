//! One-shot chainhook registration tool
//!
//! Reconciles provider-side subscriptions and exits. Useful when deploying
//! the relay behind a tunnel whose public URL changed, without restarting
//! the serving process.
//!
//! With `--delete-all`, removes every registered hook instead.

use std::process::ExitCode;

use stackslotto_relay::config::Config;
use stackslotto_relay::core::chainhooks::HookRegistrar;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let Some(registrar) = HookRegistrar::from_config(config.chainhook())? else {
        anyhow::bail!("HIRO_API_KEY and LOTTO_CONTRACT must be set to manage chainhooks");
    };

    if std::env::args().any(|arg| arg == "--delete-all") {
        let deleted = registrar.delete_all().await?;
        info!("Deleted {} hook(s)", deleted);
        return Ok(());
    }

    let summary = registrar.reconcile().await?;
    info!(
        created = summary.created,
        updated = summary.updated,
        unchanged = summary.unchanged,
        pruned = summary.pruned,
        skipped = summary.skipped,
        "Reconciliation finished"
    );

    Ok(())
}
