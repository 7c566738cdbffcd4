//! Debounced directory watching
//!
//! Watches the configured definition directories and surfaces coalesced
//! change notifications on an async channel. Each notification means "one
//! or more files changed"; the consumer runs a full reconciliation pass
//! per wake-up, so individual event details are irrelevant.

use crate::error::Result;
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::error;

/// Watcher over a set of definition directories
///
/// Dropping the watcher stops event delivery.
pub struct DirWatcher {
    // held to keep the underlying watcher threads alive
    _debouncer: Debouncer<RecommendedWatcher>,
    rx: UnboundedReceiver<()>,
}

impl DirWatcher {
    /// Start watching `dirs` (non-recursive), debouncing bursts of events
    /// into single notifications.
    pub fn new(dirs: &[PathBuf], debounce: Duration) -> Result<Self> {
        let (tx, rx) = unbounded_channel();

        let mut debouncer = new_debouncer(debounce, move |res: DebounceEventResult| match res {
            Ok(_events) => {
                let _ = tx.send(());
            }
            Err(e) => error!("watch error: {e}"),
        })?;

        for dir in dirs {
            debouncer.watcher().watch(dir, RecursiveMode::NonRecursive)?;
        }

        Ok(Self {
            _debouncer: debouncer,
            rx,
        })
    }

    /// Wait for the next change notification
    ///
    /// Drains any further notifications already queued, so one burst of
    /// file changes triggers one reconciliation pass. Returns `None` once
    /// the watcher backend has shut down.
    pub async fn next(&mut self) -> Option<()> {
        self.rx.recv().await?;
        while self.rx.try_recv().is_ok() {}
        Some(())
    }
}
