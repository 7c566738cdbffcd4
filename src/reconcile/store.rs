//! Remote entity store abstraction
//!
//! The reconciler drives any backend exposing list/delete/create over a
//! set of remote entities. The two Grafana-backed implementations live in
//! [`crate::grafana`]; tests use in-memory fakes.

use crate::error::Result;
use async_trait::async_trait;

/// The two kinds of entity this tool manages
///
/// The kind determines the definition-file suffix convention and the JSON
/// field used as the identity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Grafana dashboards, defined by `*-dashboard.json` files
    Dashboard,
    /// Grafana datasources, defined by `*-datasource.json` files
    Datasource,
}

impl EntityKind {
    /// Singular noun for log lines
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Datasource => "datasource",
        }
    }

    /// Plural noun for log lines
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboards",
            Self::Datasource => "datasources",
        }
    }

    /// Definition file-name suffix for this kind
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::Dashboard => "-dashboard.json",
            Self::Datasource => "-datasource.json",
        }
    }

    /// Top-level JSON field holding the identity key
    pub fn key_field(&self) -> &'static str {
        match self {
            Self::Dashboard => "title",
            Self::Datasource => "name",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.noun())
    }
}

/// A remote entity as reported by the server's listing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntity {
    /// Handle used for deletion (dashboard slug or datasource id)
    pub id: String,
    /// Human-readable key used for identity matching (title or name)
    pub key: String,
}

impl RemoteEntity {
    /// Create a remote entity from its deletion handle and matching key
    pub fn new(id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
        }
    }
}

/// Capability interface over one remote entity collection
///
/// One implementation exists per entity kind. Calls are sequential; the
/// reconciler never issues two operations concurrently.
#[async_trait]
pub trait EntityStore {
    /// The entity kind this store manages
    fn kind(&self) -> EntityKind;

    /// List all entities currently present on the server
    async fn list(&self) -> Result<Vec<RemoteEntity>>;

    /// Delete one entity by its listing handle
    async fn delete(&self, entity: &RemoteEntity) -> Result<()>;

    /// Create an entity from a raw definition body, forwarded verbatim
    async fn create(&self, body: Vec<u8>) -> Result<()>;
}
