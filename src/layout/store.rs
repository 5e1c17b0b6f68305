//! Route data storage.
//!
//! Pre-exported layout documents live in one flat directory:
//! `<data_dir>/<route-key>.json` for pages and `<data_dir>/<language>.json`
//! for each language's default document.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::layout::key::RouteKey;
use crate::layout::types::LayoutDocument;

/// Errors returned by a route data store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No artifact exists for the key.
    #[error("no layout data for key '{0}'")]
    NotFound(RouteKey),

    /// The artifact exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The artifact is not a valid layout document.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Read-only source of layout documents addressed by route key.
pub trait RouteDataStore: Send + Sync {
    /// Load the document stored under `key`.
    fn load(
        &self,
        key: &RouteKey,
    ) -> impl Future<Output = Result<LayoutDocument, StoreError>> + Send;
}

/// Store backed by JSON files in a single directory.
#[derive(Debug, Clone)]
pub struct FileRouteStore {
    root: PathBuf,
}

impl FileRouteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the artifact for `key`.
    ///
    /// Keys never contain separators, drive colons or dot segments, so the
    /// result is always a direct child of the root.
    pub fn artifact_path(&self, key: &RouteKey) -> PathBuf {
        self.root.join(key.file_name())
    }
}

impl RouteDataStore for FileRouteStore {
    async fn load(&self, key: &RouteKey) -> Result<LayoutDocument, StoreError> {
        let path = self.artifact_path(key);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(key.clone()));
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse { path, source })
    }
}
