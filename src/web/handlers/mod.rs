//! API handlers for the File Drawer Web API.

pub mod auth;
pub mod file;
pub mod folder;

pub use auth::*;
pub use file::*;
pub use folder::*;

use std::sync::Arc;

use crate::auth::JwtKeys;
use crate::file::{BlobStore, DEFAULT_MAX_FILE_SIZE};
use crate::Database;

/// Application state shared across handlers.
///
/// Every collaborator is built once at startup and shared by reference.
#[derive(Clone)]
pub struct AppState {
    /// Database pool.
    pub db: Arc<Database>,
    /// Blob store holding file content.
    pub blobs: Arc<dyn BlobStore>,
    /// JWT signing and verification keys.
    pub jwt: Arc<JwtKeys>,
    /// Maximum upload size in bytes.
    pub max_upload_size: usize,
}

impl AppState {
    /// Create a new application state with the default upload limit.
    pub fn new(db: Arc<Database>, blobs: Arc<dyn BlobStore>, jwt: Arc<JwtKeys>) -> Self {
        Self {
            db,
            blobs,
            jwt,
            max_upload_size: DEFAULT_MAX_FILE_SIZE as usize,
        }
    }

    /// Set the maximum upload size in bytes.
    pub fn with_max_upload_size(mut self, bytes: usize) -> Self {
        self.max_upload_size = bytes;
        self
    }
}
