//! Configuration settings for grafana-sync
//!
//! Defines the CLI argument surface and the validated runtime
//! configuration derived from it.

use crate::error::{Result, SyncError};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// grafana-sync - keep a Grafana server in step with local definition files
#[derive(Parser, Debug, Clone)]
#[command(name = "grafana-sync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Watches definition directories and syncs dashboards and datasources to Grafana")]
#[command(long_about = r#"
grafana-sync watches directories of JSON definition files and keeps a
Grafana server's dashboards and datasources in step with them.

On startup and on every file change it rebuilds the remote state: all
remote entities are deleted, then everything is recreated from the
current local files.

File naming convention:
  <anything>-dashboard.json    dashboard definition (top-level "title")
  <anything>-datasource.json   datasource definition (top-level "name")

Examples:
  grafana-sync --grafana-url http://grafana:3000 --watch-dir /etc/grafana/defs
  grafana-sync --grafana-url http://grafana:3000 \
      --watch-dir /defs/base --watch-dir /defs/extra --ignore-missing
"#)]
pub struct CliArgs {
    /// Directory containing definition files (repeatable)
    #[arg(long = "watch-dir", value_name = "DIR", required = true)]
    pub watch_dirs: Vec<PathBuf>,

    /// Base URL of the Grafana server
    #[arg(long, env = "GRAFANA_URL", value_name = "URL")]
    pub grafana_url: String,

    /// Log remote entities whose title/name still matches a local file
    /// as ignored during deletion
    #[arg(long)]
    pub ignore_missing: bool,

    /// Debounce window for file-change events, in milliseconds
    #[arg(long, default_value = "500", value_name = "MILLIS")]
    pub debounce_ms: u64,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Directories scanned for definition files and watched for changes
    pub watch_dirs: Vec<PathBuf>,
    /// Base URL of the Grafana server
    pub grafana_url: String,
    /// Whether deletion logs spare entities with a local match
    pub ignore_missing: bool,
    /// Debounce window for the filesystem watcher
    pub debounce: Duration,
}

impl SyncConfig {
    /// Build and validate the configuration from parsed CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        reqwest::Url::parse(&args.grafana_url).map_err(|e| {
            SyncError::config(format!("invalid Grafana URL '{}': {e}", args.grafana_url))
        })?;

        for dir in &args.watch_dirs {
            if !dir.is_dir() {
                return Err(SyncError::config(format!(
                    "watch directory '{}' does not exist or is not a directory",
                    dir.display()
                )));
            }
        }

        Ok(Self {
            watch_dirs: args.watch_dirs.clone(),
            grafana_url: args.grafana_url.clone(),
            ignore_missing: args.ignore_missing,
            debounce: Duration::from_millis(args.debounce_ms),
        })
    }
}
