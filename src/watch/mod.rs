//! Filesystem watching module
//!
//! Debounced change notification for the definition directories.

mod watcher;

pub use watcher::DirWatcher;
