//! Grafana REST API client
//!
//! Thin reqwest wrapper over the dashboard and datasource endpoints.
//! Definition bodies are forwarded verbatim; the client never inspects or
//! rewrites them. No authentication and no retries.

use crate::error::{Result, SyncError};
use crate::grafana::models::{DashboardHit, DatasourceSummary};

/// Client for one Grafana server
#[derive(Debug, Clone)]
pub struct GrafanaClient {
    http: reqwest::Client,
    base_url: String,
}

impl GrafanaClient {
    /// Create a client for the server at `base_url` (trailing slashes ignored)
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// List all dashboards via the search endpoint
    pub async fn search_dashboards(&self) -> Result<Vec<DashboardHit>> {
        let resp = self.http.get(self.api_url("search")).send().await?;
        decode_json(resp).await
    }

    /// Delete a dashboard by slug
    pub async fn delete_dashboard(&self, slug: &str) -> Result<()> {
        let url = self.api_url(&format!("dashboards/db/{slug}"));
        let resp = self.http.delete(url).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Create a dashboard from a raw definition body
    pub async fn create_dashboard(&self, body: Vec<u8>) -> Result<()> {
        let resp = self
            .http
            .post(self.api_url("dashboards/db"))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    /// List all datasources
    pub async fn all_datasources(&self) -> Result<Vec<DatasourceSummary>> {
        let resp = self.http.get(self.api_url("datasources")).send().await?;
        decode_json(resp).await
    }

    /// Delete a datasource by id
    pub async fn delete_datasource(&self, id: &str) -> Result<()> {
        let url = self.api_url(&format!("datasources/{id}"));
        let resp = self.http.delete(url).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Create a datasource from a raw definition body
    pub async fn create_datasource(&self, body: Vec<u8>) -> Result<()> {
        let resp = self
            .http
            .post(self.api_url("datasources"))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }
}

/// Fail on non-success statuses, carrying the response body for diagnostics
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(SyncError::api(status.as_u16(), body));
    }
    Ok(resp)
}

/// Check the status, then decode the body as JSON
async fn decode_json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let resp = check_status(resp).await?;
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(SyncError::Decode)
}
