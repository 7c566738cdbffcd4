//! # grafana-sync - Directory-to-Grafana Reconciliation
//!
//! grafana-sync keeps a Grafana server's dashboards and datasources in
//! step with directories of JSON definition files. On startup and on
//! every file change it performs a full rebuild: delete all remote
//! entities of a kind, then recreate them from the current local files.
//!
//! ## How it works
//!
//! - **Definition files**: `*-dashboard.json` and `*-datasource.json`
//!   files in the watched directories; bodies are forwarded to Grafana
//!   verbatim
//! - **Full-rebuild sync**: no diffing or patching; each pass converges
//!   the server to the local file set
//! - **Protection logging**: with `--ignore-missing`, remote entities
//!   whose title/name still matches a local file are logged as ignored
//!   during deletion
//! - **Fail-fast passes**: the first error aborts the pass; the next file
//!   change (or restart) retries from scratch
//!
//! ## Quick Start
//!
//! ```no_run
//! use grafana_sync::grafana::{DashboardsApi, GrafanaClient};
//! use grafana_sync::reconcile::Reconciler;
//! use std::path::PathBuf;
//!
//! # async fn example() -> grafana_sync::error::Result<()> {
//! let client = GrafanaClient::new("http://grafana:3000");
//! let dashboards = Reconciler::new(
//!     DashboardsApi::new(client),
//!     vec![PathBuf::from("/etc/grafana/defs")],
//!     false,
//! );
//!
//! dashboards.init().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom backends
//!
//! The reconciler is generic over [`reconcile::EntityStore`]; any backend
//! exposing list/delete/create over a keyed entity collection can be
//! driven the same way.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod grafana;
pub mod reconcile;
pub mod watch;

// Re-export commonly used types
pub use config::{CliArgs, SyncConfig};
pub use error::{Result, SyncError};
pub use grafana::GrafanaClient;
pub use reconcile::{EntityKind, EntityStore, Reconciler, RemoteEntity};
pub use watch::DirWatcher;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
