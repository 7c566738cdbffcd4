//! Wire types for the Grafana HTTP API

use serde::Deserialize;

/// One hit from `GET /api/search`
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardHit {
    /// Numeric dashboard id
    #[serde(default)]
    pub id: i64,
    /// Dashboard title
    pub title: String,
    /// Search uri, e.g. `db/node-exporter`
    pub uri: String,
}

impl DashboardHit {
    /// Slug used in dashboard URLs, the `uri` with its `db/` prefix stripped
    pub fn slug(&self) -> &str {
        self.uri.strip_prefix("db/").unwrap_or(&self.uri)
    }
}

/// One entry from `GET /api/datasources`
#[derive(Debug, Clone, Deserialize)]
pub struct DatasourceSummary {
    /// Numeric datasource id, the deletion handle
    pub id: i64,
    /// Datasource name
    pub name: String,
}
