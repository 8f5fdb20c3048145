// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Best-effort mirror store.
//!
//! Stands in for the remote document store the reference system mirrored
//! into. The service layer performs mirror writes fire-and-forget: a mirror
//! failure is logged and swallowed, never surfaced, and never rolls back
//! the primary store.

use crate::error::PersistenceError;
use std::fs;
use std::path::{Path, PathBuf};

/// A secondary document store receiving best-effort copies of every write.
pub trait Mirror: Send + Sync {
    /// Creates or replaces one document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn upsert(
        &self,
        collection: &str,
        key: &str,
        body: &serde_json::Value,
    ) -> Result<(), PersistenceError>;

    /// Removes one document. Removing a missing document is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    fn remove(&self, collection: &str, key: &str) -> Result<(), PersistenceError>;

    /// Removes a whole collection. A missing collection is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    fn wipe(&self, collection: &str) -> Result<(), PersistenceError>;
}

/// A mirror writing one JSON file per document under
/// `<root>/<collection>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirMirror {
    root: PathBuf,
}

impl JsonDirMirror {
    /// Creates a mirror rooted at the given directory.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn document_path(&self, collection: &str, key: &str) -> PathBuf {
        self.root.join(collection).join(format!("{key}.json"))
    }
}

impl Mirror for JsonDirMirror {
    fn upsert(
        &self,
        collection: &str,
        key: &str,
        body: &serde_json::Value,
    ) -> Result<(), PersistenceError> {
        let path = self.document_path(collection, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(body)?)?;
        Ok(())
    }

    fn remove(&self, collection: &str, key: &str) -> Result<(), PersistenceError> {
        let path = self.document_path(collection, key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn wipe(&self, collection: &str) -> Result<(), PersistenceError> {
        let dir = self.root.join(collection);
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
