//! Reconciliation engine
//!
//! Drives one full sync pass for an entity kind: delete every remote
//! entity, then recreate the whole set from the local definition files.
//! Both entry points run the same pass; convergence after a partial
//! failure comes from re-invocation, not from rollback.

use crate::error::{IoResultExt, Result};
use crate::reconcile::{files, EntityStore};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, info_span, Instrument};

/// Full-rebuild reconciler for one entity kind
///
/// Generic over the remote [`EntityStore`]; the dashboard and datasource
/// reconcilers differ only in the store they are given.
pub struct Reconciler<S> {
    store: S,
    watch_dirs: Vec<PathBuf>,
    ignore_missing: bool,
}

impl<S: EntityStore> Reconciler<S> {
    /// Create a reconciler over `store` for definitions found in `watch_dirs`
    pub fn new(store: S, watch_dirs: Vec<PathBuf>, ignore_missing: bool) -> Self {
        Self {
            store,
            watch_dirs,
            ignore_missing,
        }
    }

    /// Run the initial reconciliation pass at startup
    pub async fn init(&self) -> Result<()> {
        self.reconcile().await
    }

    /// Run a reconciliation pass after a local file change
    pub async fn on_modify(&self) -> Result<()> {
        self.reconcile().await
    }

    /// One full pass: load the protection set (if enabled), delete all
    /// remote entities, recreate everything from local files.
    ///
    /// Returns the first error encountered; the pass stops there with no
    /// partial-success reporting.
    async fn reconcile(&self) -> Result<()> {
        let kind = self.store.kind();
        let span = info_span!("reconcile", kind = kind.noun());

        async {
            let local_keys = if self.ignore_missing {
                files::load_local_keys(&self.watch_dirs, kind)?
            } else {
                HashSet::new()
            };

            self.delete_all(&local_keys).await?;
            self.create_from_files().await
        }
        .instrument(span)
        .await
    }

    async fn delete_all(&self, local_keys: &HashSet<String>) -> Result<()> {
        let kind = self.store.kind();

        info!("retrieving existing {}", kind.plural());
        let entities = self.store.list().await?;

        info!("deleting {} {}", entities.len(), kind.plural());
        for entity in &entities {
            if self.ignore_missing && local_keys.contains(&entity.key) {
                info!("ignoring {}: {}", kind, entity.id);
            } else {
                info!("deleting {}: {}", kind, entity.id);
            }

            // an entity with a local match is still deleted; the protection
            // set only selects the log line, and creation below restores it
            self.store.delete(entity).await?;
        }

        Ok(())
    }

    async fn create_from_files(&self) -> Result<()> {
        let kind = self.store.kind();

        for path in files::find_definition_files(&self.watch_dirs, kind)? {
            info!("creating {} from {}", kind, path.display());
            let body = std::fs::read(&path).with_path(&path)?;
            self.store.create(body).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::reconcile::{EntityKind, RemoteEntity};
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Operations observed by the fake store, in call order
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        List,
        Delete(String),
        Create(String),
    }

    /// In-memory stand-in for a Grafana entity collection
    struct FakeStore {
        kind: EntityKind,
        remote: Mutex<Vec<RemoteEntity>>,
        ops: Mutex<Vec<Op>>,
        fail_delete_at: Option<usize>,
    }

    impl FakeStore {
        fn new(kind: EntityKind, remote: Vec<RemoteEntity>) -> Self {
            Self {
                kind,
                remote: Mutex::new(remote),
                ops: Mutex::new(Vec::new()),
                fail_delete_at: None,
            }
        }

        fn failing_delete_at(mut self, index: usize) -> Self {
            self.fail_delete_at = Some(index);
            self
        }

        fn remote_keys(&self) -> Vec<String> {
            let mut keys: Vec<String> = self
                .remote
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.key.clone())
                .collect();
            keys.sort();
            keys
        }

        fn ops(&self) -> Vec<Op> {
            self.ops.lock().unwrap().clone()
        }

        fn delete_count(&self) -> usize {
            self.ops()
                .iter()
                .filter(|op| matches!(op, Op::Delete(_)))
                .count()
        }

        fn create_count(&self) -> usize {
            self.ops()
                .iter()
                .filter(|op| matches!(op, Op::Create(_)))
                .count()
        }
    }

    #[async_trait]
    impl<'a> EntityStore for &'a FakeStore {
        fn kind(&self) -> EntityKind {
            self.kind
        }

        async fn list(&self) -> Result<Vec<RemoteEntity>> {
            self.ops.lock().unwrap().push(Op::List);
            Ok(self.remote.lock().unwrap().clone())
        }

        async fn delete(&self, entity: &RemoteEntity) -> Result<()> {
            let deleted_so_far = self.delete_count();
            if self.fail_delete_at == Some(deleted_so_far) {
                return Err(SyncError::api(500, "delete failed"));
            }
            self.ops.lock().unwrap().push(Op::Delete(entity.id.clone()));
            self.remote.lock().unwrap().retain(|e| e.id != entity.id);
            Ok(())
        }

        async fn create(&self, body: Vec<u8>) -> Result<()> {
            let key = files::extract_key(std::path::Path::new("body"), &body, self.kind)?;
            self.ops.lock().unwrap().push(Op::Create(key.clone()));
            self.remote
                .lock()
                .unwrap()
                .push(RemoteEntity::new(key.clone(), key));
            Ok(())
        }
    }

    fn dashboard_file(dir: &TempDir, name: &str, title: &str) {
        let body = format!(r#"{{"title":"{title}","rows":[]}}"#);
        fs::write(dir.path().join(name), body).unwrap();
    }

    fn reconciler<'a>(
        store: &'a FakeStore,
        dir: &TempDir,
        ignore_missing: bool,
    ) -> Reconciler<&'a FakeStore> {
        Reconciler::new(store, vec![dir.path().to_path_buf()], ignore_missing)
    }

    #[tokio::test]
    async fn test_remote_set_becomes_image_of_local_files() {
        let dir = TempDir::new().unwrap();
        dashboard_file(&dir, "cpu-dashboard.json", "CPU");
        dashboard_file(&dir, "mem-dashboard.json", "Memory");

        let store = FakeStore::new(
            EntityKind::Dashboard,
            vec![
                RemoteEntity::new("stale-one", "Stale One"),
                RemoteEntity::new("stale-two", "Stale Two"),
            ],
        );

        reconciler(&store, &dir, false).init().await.unwrap();

        assert_eq!(store.remote_keys(), vec!["CPU", "Memory"]);
        assert_eq!(store.delete_count(), 2);
        assert_eq!(store.create_count(), 2);
    }

    #[tokio::test]
    async fn test_locally_matched_entity_is_still_deleted_and_recreated() {
        let dir = TempDir::new().unwrap();
        dashboard_file(&dir, "cpu-dashboard.json", "CPU");

        let store = FakeStore::new(
            EntityKind::Dashboard,
            vec![RemoteEntity::new("cpu", "CPU")],
        );

        reconciler(&store, &dir, true).init().await.unwrap();

        // ignore-missing changes the log line, not the outcome
        assert_eq!(store.ops()[1], Op::Delete("cpu".to_string()));
        assert_eq!(store.remote_keys(), vec!["CPU"]);
    }

    #[tokio::test]
    async fn test_reconciliation_is_idempotent() {
        let dir = TempDir::new().unwrap();
        dashboard_file(&dir, "cpu-dashboard.json", "CPU");

        let store = FakeStore::new(
            EntityKind::Dashboard,
            vec![RemoteEntity::new("old", "Old")],
        );
        let sync = reconciler(&store, &dir, false);

        sync.init().await.unwrap();
        let after_first = store.remote_keys();
        sync.on_modify().await.unwrap();
        let after_second = store.remote_keys();

        assert_eq!(after_first, vec!["CPU"]);
        assert_eq!(after_first, after_second);
    }

    #[tokio::test]
    async fn test_delete_failure_aborts_before_any_create() {
        let dir = TempDir::new().unwrap();
        dashboard_file(&dir, "cpu-dashboard.json", "CPU");

        let store = FakeStore::new(
            EntityKind::Dashboard,
            vec![
                RemoteEntity::new("one", "One"),
                RemoteEntity::new("two", "Two"),
                RemoteEntity::new("three", "Three"),
            ],
        )
        .failing_delete_at(1);

        let err = reconciler(&store, &dir, false).init().await.unwrap_err();

        assert!(matches!(err, SyncError::Api { status: 500, .. }));
        assert_eq!(store.delete_count(), 1);
        assert_eq!(store.create_count(), 0);
        // the remaining entities survive until the next pass
        assert_eq!(store.remote_keys(), vec!["Three", "Two"]);
    }

    #[tokio::test]
    async fn test_only_suffix_matched_files_are_created() {
        let dir = TempDir::new().unwrap();
        dashboard_file(&dir, "a-dashboard.json", "A");
        fs::write(dir.path().join("b-other.json"), r#"{"title":"B"}"#).unwrap();

        let store = FakeStore::new(EntityKind::Dashboard, Vec::new());

        reconciler(&store, &dir, false).init().await.unwrap();

        assert_eq!(store.remote_keys(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_malformed_local_file_aborts_before_any_remote_call() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad-dashboard.json"), "{not json").unwrap();

        let store = FakeStore::new(
            EntityKind::Dashboard,
            vec![RemoteEntity::new("keep", "Keep")],
        );

        let err = reconciler(&store, &dir, true).init().await.unwrap_err();

        assert!(matches!(err, SyncError::Json { .. }));
        assert!(store.ops().is_empty());
        assert_eq!(store.remote_keys(), vec!["Keep"]);
    }

    #[tokio::test]
    async fn test_create_failure_leaves_remaining_files_uncreated() {
        let dir = TempDir::new().unwrap();
        dashboard_file(&dir, "a-dashboard.json", "A");
        fs::write(dir.path().join("b-dashboard.json"), r#"{"nope":1}"#).unwrap();
        dashboard_file(&dir, "c-dashboard.json", "C");

        let store = FakeStore::new(EntityKind::Dashboard, Vec::new());

        // the fake's create parses the body, so the b file fails mid-sequence
        let err = reconciler(&store, &dir, false).init().await.unwrap_err();

        assert!(matches!(err, SyncError::MissingField { .. }));
        assert_eq!(store.remote_keys(), vec!["A"]);
    }
}
