//! Grafana API module
//!
//! Provides the HTTP client for the Grafana REST API and the entity store
//! adapters the reconciler runs against.

mod client;
mod models;
mod stores;

pub use client::GrafanaClient;
pub use models::{DashboardHit, DatasourceSummary};
pub use stores::{DashboardsApi, DatasourcesApi};
