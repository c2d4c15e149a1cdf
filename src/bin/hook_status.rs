//! Print the provider's registered chainhooks

use std::process::ExitCode;

use stackslotto_relay::config::Config;
use stackslotto_relay::core::chainhooks::HookRegistrar;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
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
        anyhow::bail!("HIRO_API_KEY and LOTTO_CONTRACT must be set to query chainhooks");
    };

    let list = registrar.list().await?;
    println!("{} registered chainhook(s)", list.total);

    for record in &list.results {
        let enabled = record
            .status
            .as_ref()
            .and_then(|s| s.enabled)
            .map(|e| if e { "enabled" } else { "disabled" })
            .unwrap_or("unknown");
        let status = record
            .status
            .as_ref()
            .and_then(|s| s.status.as_deref())
            .unwrap_or("unknown");
        let url = record.action_url().unwrap_or("-");

        println!(
            "  {:<28} {}  [{} / {}]  -> {}",
            record.name(),
            record.uuid,
            enabled,
            status,
            url
        );
    }

    Ok(())
}
