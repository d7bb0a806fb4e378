//! Blob store seam for File Drawer.
//!
//! File content never touches the metadata database. A `BlobStore` takes the
//! bytes and hands back a stable identifier plus a retrieval URL.

use async_trait::async_trait;

use crate::Result;

/// Location of content accepted by a blob store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Identifier used to remove the blob later.
    pub stored_id: String,
    /// URL the content can be fetched from.
    pub url: String,
}

/// External storage for file content.
///
/// Implementations must be safe to share across requests; calls may be slow
/// network operations and must not hold locks that serialize unrelated work.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store content and return its identifier and URL.
    async fn store(&self, content: &[u8], filename: &str) -> Result<StoredBlob>;

    /// Remove previously stored content.
    async fn remove(&self, stored_id: &str) -> Result<()>;

    /// Fetch stored content, if this store serves content itself.
    ///
    /// Stores whose URLs point at an external service return `Ok(None)`.
    async fn fetch(&self, _stored_id: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
}
