//! Storage: persist rendered PDFs with their metadata.
//!
//! [`FileSystemStore`] lays objects out the way the object store does,
//! keyed by deployment environment:
//!
//! ```text
//! {root}/{branch}/{filename}.pdf
//! {root}/{branch}/{filename}.pdf.metadata.json
//! ```
//!
//! Both files are written atomically (temp file + rename) so a crash never
//! leaves a truncated PDF where a reader expects a complete one.

use crate::model::document::Metadata;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to store outside the store root: '{filename}'")]
    InvalidFilename { filename: String },

    #[error("metadata could not be serialised: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// Destination for rendered documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store `bytes` under `filename` (without extension) with `metadata`.
    async fn upload(
        &self,
        filename: &str,
        bytes: &[u8],
        metadata: &Metadata,
    ) -> Result<(), StoreError>;
}

/// Stores documents on the local file system.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
    branch: String,
}

impl FileSystemStore {
    pub fn new(root: impl Into<PathBuf>, branch: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            branch: branch.into(),
        }
    }

    /// Path of the stored PDF for `filename`.
    pub fn pdf_path(&self, filename: &str) -> PathBuf {
        self.root.join(&self.branch).join(format!("{filename}.pdf"))
    }

    /// Path of the metadata sidecar for `filename`.
    pub fn metadata_path(&self, filename: &str) -> PathBuf {
        self.root
            .join(&self.branch)
            .join(format!("{filename}.pdf.metadata.json"))
    }
}

#[async_trait]
impl DocumentStore for FileSystemStore {
    async fn upload(
        &self,
        filename: &str,
        bytes: &[u8],
        metadata: &Metadata,
    ) -> Result<(), StoreError> {
        if escapes_root(filename) {
            return Err(StoreError::InvalidFilename {
                filename: filename.to_string(),
            });
        }

        let pdf_path = self.pdf_path(filename);
        let sidecar = serde_json::to_vec_pretty(metadata)?;

        write_atomic(&pdf_path, bytes).await?;
        write_atomic(&self.metadata_path(filename), &sidecar).await?;

        debug!("Stored {} ({} bytes)", pdf_path.display(), bytes.len());
        Ok(())
    }
}

/// True when `filename` would resolve outside `{root}/{branch}`.
fn escapes_root(filename: &str) -> bool {
    Path::new(filename).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

/// Write to `{path}.tmp`, then rename over `path`.
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp_path = PathBuf::from(tmp);

    tokio::fs::write(&tmp_path, contents).await.map_err(io_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(io_err)?;
    Ok(())
}
