//! Directory Provider
//!
//! Resolves identifiers to JSON documents stored as `<root>/<id>.json`.
//! Every `resolve` reads and parses the file again.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde_json::Value;
use tracing::trace;

use super::Provider;
use crate::error::LookupError;

// == Public Constants ==
/// Maximum allowed identifier length in bytes
pub const MAX_ID_LENGTH: usize = 256;

// == Dir Provider ==
/// File-backed provider over a directory of JSON documents.
#[derive(Debug, Clone)]
pub struct DirProvider {
    /// Directory holding one `<id>.json` file per entry
    root: PathBuf,
}

impl DirProvider {
    // == Constructor ==
    /// Creates a provider reading documents from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // == Path Mapping ==
    /// Maps an identifier to its document path, or None for identifiers that
    /// cannot name a document (empty, too long, path separators, leading dot).
    fn document_path(&self, id: &str) -> Option<PathBuf> {
        if !is_valid_id(id) {
            return None;
        }
        Some(self.root.join(format!("{id}.json")))
    }
}

/// Identifiers are limited to `[A-Za-z0-9_.-]` and may not start with a dot.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ID_LENGTH
        && !id.starts_with('.')
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'))
}

impl Provider for DirProvider {
    type Value = Value;
    type Error = LookupError;

    fn resolve(&self, id: &str) -> Result<Value, LookupError> {
        let path = self
            .document_path(id)
            .ok_or_else(|| LookupError::NotFound(id.to_string()))?;

        trace!(id, path = %path.display(), "Reading document");
        let raw = fs::read_to_string(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => LookupError::NotFound(id.to_string()),
            _ => LookupError::resolution(id, err),
        })?;

        serde_json::from_str(&raw).map_err(|err| LookupError::resolution(id, err))
    }

    fn has(&self, id: &str) -> bool {
        self.document_path(id).is_some_and(|path| path.is_file())
    }
}
