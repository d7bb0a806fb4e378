//! Local-disk blob store for File Drawer.
//!
//! Files are stored in a sharded directory structure:
//! ```text
//! {base_path}/
//! ├── ab/
//! │   └── ab12cd34-5678-90ab-cdef-123456789012.pdf
//! ├── cd/
//! │   └── cd90ab12-3456-7890-abcd-ef1234567890.bin
//! └── ...
//! ```

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use super::blob::{BlobStore, StoredBlob};
use crate::{DrawerError, Result};

/// Blob store writing content under a local directory.
///
/// Retrieval URLs have the form `{public_base_url}/blobs/{stored_id}` and are
/// served by the web layer through [`BlobStore::fetch`].
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore rooted at `base_path`.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Result<Self> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;

        Ok(Self {
            base_path,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get the base path of this store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Build the retrieval URL for a stored id.
    pub fn url_for(&self, stored_id: &str) -> String {
        format!("{}/blobs/{}", self.public_base_url, stored_id)
    }

    /// Get the full path for a stored id: `{base_path}/{shard}/{stored_id}`.
    ///
    /// Returns `None` for ids this store could never have produced, which
    /// keeps path traversal out of the filesystem calls.
    pub fn path_for(&self, stored_id: &str) -> Option<PathBuf> {
        if !Self::is_valid_stored_id(stored_id) {
            return None;
        }
        Some(self.base_path.join(&stored_id[..2]).join(stored_id))
    }

    /// Generate a new UUID-based stored id keeping the original extension.
    pub fn generate_stored_id(original_name: &str) -> String {
        let ext = Self::extract_extension(original_name);
        format!("{}.{}", Uuid::new_v4(), ext)
    }

    fn is_valid_stored_id(stored_id: &str) -> bool {
        stored_id.len() >= 2
            && !stored_id.starts_with('.')
            && !stored_id.contains("..")
            && stored_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    }

    /// Extension of the filename, or "bin". Non-alphanumeric extensions are
    /// replaced so the stored id stays within the accepted alphabet.
    fn extract_extension(filename: &str) -> String {
        Path::new(filename)
            .extension()
            .and_then(|s| s.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_else(|| "bin".to_string())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn store(&self, content: &[u8], filename: &str) -> Result<StoredBlob> {
        let stored_id = Self::generate_stored_id(filename);
        let path = self
            .path_for(&stored_id)
            .ok_or_else(|| DrawerError::Blob(format!("invalid stored id: {stored_id}")))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, content).await?;
        debug!(stored_id = %stored_id, size = content.len(), "Blob stored");

        Ok(StoredBlob {
            url: self.url_for(&stored_id),
            stored_id,
        })
    }

    async fn remove(&self, stored_id: &str) -> Result<()> {
        let path = self
            .path_for(stored_id)
            .ok_or_else(|| DrawerError::Blob(format!("invalid stored id: {stored_id}")))?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(stored_id = %stored_id, "Blob already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch(&self, stored_id: &str) -> Result<Option<Vec<u8>>> {
        let Some(path) = self.path_for(stored_id) else {
            return Ok(None);
        };

        match fs::read(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
