//! grafana-sync CLI - keeps a Grafana server in step with local definition files

use clap::Parser;
use grafana_sync::config::{CliArgs, SyncConfig};
use grafana_sync::error::Result;
use grafana_sync::grafana::{DashboardsApi, DatasourcesApi, GrafanaClient};
use grafana_sync::reconcile::Reconciler;
use grafana_sync::watch::DirWatcher;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();

    // Handle result
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let config = SyncConfig::from_cli(&args)?;
    let client = GrafanaClient::new(&config.grafana_url);

    // datasources first: dashboards may reference them by name
    let datasources = Reconciler::new(
        DatasourcesApi::new(client.clone()),
        config.watch_dirs.clone(),
        config.ignore_missing,
    );
    let dashboards = Reconciler::new(
        DashboardsApi::new(client),
        config.watch_dirs.clone(),
        config.ignore_missing,
    );

    datasources.init().await?;
    dashboards.init().await?;

    let mut watcher = DirWatcher::new(&config.watch_dirs, config.debounce)?;
    info!(
        "watching {} directories for definition changes",
        config.watch_dirs.len()
    );

    while watcher.next().await.is_some() {
        if let Err(e) = datasources.on_modify().await {
            error!("datasource sync failed: {e}");
        }
        if let Err(e) = dashboards.on_modify().await {
            error!("dashboard sync failed: {e}");
        }
    }

    Ok(())
}
