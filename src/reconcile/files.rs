//! Definition file discovery
//!
//! Finds dashboard/datasource definition files in the configured watch
//! directories by their file-name suffix convention and extracts the
//! identity key from their JSON bodies.

use crate::error::{IoResultExt, Result, SyncError};
use crate::reconcile::EntityKind;
use globset::Glob;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Find all definition files for `kind` across the given directories.
///
/// Matching is non-recursive: only direct children of each directory are
/// considered. Within a directory, matches are sorted by file name so the
/// creation order is deterministic per environment.
pub fn find_definition_files(dirs: &[PathBuf], kind: EntityKind) -> Result<Vec<PathBuf>> {
    let matcher = Glob::new(&format!("*{}", kind.file_suffix()))?.compile_matcher();

    let mut files = Vec::new();
    for dir in dirs {
        let mut matched = Vec::new();
        for entry in std::fs::read_dir(dir).with_path(dir)? {
            let entry = entry.with_path(dir)?;
            let path = entry.path();
            let is_file = entry.file_type().with_path(&path)?.is_file();
            if is_file && matcher.is_match(entry.file_name()) {
                matched.push(path);
            }
        }
        matched.sort();
        files.extend(matched);
    }

    Ok(files)
}

/// Load the identity keys of all local definition files for `kind`.
///
/// Any unreadable file, malformed JSON body, or missing key field fails the
/// whole scan.
pub fn load_local_keys(dirs: &[PathBuf], kind: EntityKind) -> Result<HashSet<String>> {
    let mut keys = HashSet::new();
    for path in find_definition_files(dirs, kind)? {
        let bytes = std::fs::read(&path).with_path(&path)?;
        keys.insert(extract_key(&path, &bytes, kind)?);
    }
    Ok(keys)
}

/// Extract the identity key (`title` or `name`) from a definition body
pub fn extract_key(path: &Path, bytes: &[u8], kind: EntityKind) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| SyncError::json(path, e))?;

    value
        .get(kind.key_field())
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .ok_or_else(|| SyncError::missing_field(path, kind.key_field()))
}
