//! Reconciliation module
//!
//! Provides the delete-then-recreate sync engine:
//! - Generic reconciler over any remote entity store
//! - Definition file discovery by suffix convention
//! - Identity-key extraction for protection matching

mod files;
mod reconciler;
mod store;

pub use files::{extract_key, find_definition_files, load_local_keys};
pub use reconciler::Reconciler;
pub use store::{EntityKind, EntityStore, RemoteEntity};
