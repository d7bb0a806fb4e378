//! File Drawer - per-user folder and file storage backend.
//!
//! Authenticated users organize uploaded files into folders. Metadata lives in
//! SQLite; file content is handed to a pluggable blob store.

pub mod auth;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use auth::{JwtKeys, Principal};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{DrawerError, Result};
pub use file::{
    BlobStore, FileMetadata, FileRegistry, Folder, FolderDirectory, LocalBlobStore, StoredBlob,
};
pub use web::WebServer;
