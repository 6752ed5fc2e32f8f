// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flat-file JSON document store.
//!
//! One document per entity at `<root>/<collection>/<id>.json`. Collections
//! are physically isolated directories so listing, backup and inspection
//! per entity type stay trivial. Uniqueness of a key is enforced by the
//! filesystem itself: `create` opens the target with `create_new`, so two
//! concurrent creates of the same id cannot both succeed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::store::collections;

/// Storage-layer failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document already exists")]
    AlreadyExists,

    #[error("document not found")]
    NotFound,

    #[error("invalid document key")]
    InvalidKey,

    #[error("stored document is not valid JSON: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error(transparent)]
    Io(std::io::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Flat-file document store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the collection directories
    /// if they do not exist yet.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();

        for collection in collections::ALL {
            fs::create_dir_all(root.join(collection))
                .await
                .map_err(StoreError::Io)?;
        }

        tracing::info!(root = %root.display(), "Document store opened");

        Ok(Self { root })
    }

    /// Create a new document. Fails with `AlreadyExists` if a document is
    /// already stored under `(collection, id)`.
    pub async fn create<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        document: &T,
    ) -> StoreResult<()> {
        let path = self.document_path(collection, id)?;
        let bytes = serde_json::to_vec(document).map_err(StoreError::Corrupt)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StoreError::AlreadyExists,
                _ => StoreError::Io(e),
            })?;

        if let Err(e) = write_and_flush(&mut file, &bytes).await {
            // Never leave a partially written document behind.
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(StoreError::Io(e));
        }

        Ok(())
    }

    /// Read and deserialize a document.
    ///
    /// Unparseable bytes are always an error (`Corrupt`), never silently
    /// an empty document.
    pub async fn read<T: DeserializeOwned>(&self, collection: &str, id: &str) -> StoreResult<T> {
        let path = self.document_path(collection, id)?;

        let bytes = fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(e),
        })?;

        serde_json::from_slice(&bytes).map_err(StoreError::Corrupt)
    }

    /// Replace an existing document wholesale (truncate + rewrite).
    /// Fails with `NotFound` if the document does not exist.
    pub async fn update<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        document: &T,
    ) -> StoreResult<()> {
        let path = self.document_path(collection, id)?;
        let bytes = serde_json::to_vec(document).map_err(StoreError::Corrupt)?;

        // No `create` flag: opening fails if the target is missing.
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StoreError::NotFound,
                _ => StoreError::Io(e),
            })?;

        write_and_flush(&mut file, &bytes)
            .await
            .map_err(StoreError::Io)
    }

    /// Remove a document. Fails with `NotFound` if absent.
    pub async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let path = self.document_path(collection, id)?;

        fs::remove_file(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(e),
        })
    }

    fn document_path(&self, collection: &str, id: &str) -> StoreResult<PathBuf> {
        if !valid_key(collection) || !valid_key(id) {
            return Err(StoreError::InvalidKey);
        }
        Ok(self.root.join(collection).join(format!("{id}.json")))
    }

    /// Root data directory (for inspection and tests).
    pub fn root(&self) -> &Path {
        &self.root
    }
}

async fn write_and_flush(file: &mut fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

/// Keys become file names; restrict them so an id can never escape its
/// collection directory.
fn valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
