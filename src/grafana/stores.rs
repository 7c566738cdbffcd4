//! Entity store adapters over the Grafana client
//!
//! Bridge the kind-specific Grafana endpoints to the uniform
//! [`EntityStore`] interface consumed by the reconciler.

use crate::error::Result;
use crate::grafana::GrafanaClient;
use crate::reconcile::{EntityKind, EntityStore, RemoteEntity};
use async_trait::async_trait;

/// Dashboard collection of one Grafana server
pub struct DashboardsApi {
    client: GrafanaClient,
}

impl DashboardsApi {
    /// Wrap a client as the dashboard store
    pub fn new(client: GrafanaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EntityStore for DashboardsApi {
    fn kind(&self) -> EntityKind {
        EntityKind::Dashboard
    }

    async fn list(&self) -> Result<Vec<RemoteEntity>> {
        let hits = self.client.search_dashboards().await?;
        Ok(hits
            .into_iter()
            .map(|hit| {
                let slug = hit.slug().to_string();
                RemoteEntity::new(slug, hit.title)
            })
            .collect())
    }

    async fn delete(&self, entity: &RemoteEntity) -> Result<()> {
        self.client.delete_dashboard(&entity.id).await
    }

    async fn create(&self, body: Vec<u8>) -> Result<()> {
        self.client.create_dashboard(body).await
    }
}

/// Datasource collection of one Grafana server
pub struct DatasourcesApi {
    client: GrafanaClient,
}

impl DatasourcesApi {
    /// Wrap a client as the datasource store
    pub fn new(client: GrafanaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EntityStore for DatasourcesApi {
    fn kind(&self) -> EntityKind {
        EntityKind::Datasource
    }

    async fn list(&self) -> Result<Vec<RemoteEntity>> {
        let datasources = self.client.all_datasources().await?;
        Ok(datasources
            .into_iter()
            .map(|ds| RemoteEntity::new(ds.id.to_string(), ds.name))
            .collect())
    }

    async fn delete(&self, entity: &RemoteEntity) -> Result<()> {
        self.client.delete_datasource(&entity.id).await
    }

    async fn create(&self, body: Vec<u8>) -> Result<()> {
        self.client.create_datasource(body).await
    }
}
