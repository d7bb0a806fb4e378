//! Folder and file management for File Drawer.
//!
//! This module provides:
//! - Owner-scoped folder records with per-owner unique names
//! - File metadata records, optionally linked to one folder
//! - The blob store seam and a local-disk implementation
//! - `FolderDirectory` and `FileRegistry`, which enforce the access and
//!   conflict rules on top of the repositories

mod blob;
mod directory;
mod folder;
mod metadata;
mod registry;
mod storage;

pub use blob::{BlobStore, StoredBlob};
pub use directory::{FolderDirectory, FolderWithFiles};
pub use folder::{Folder, FolderRepository, NewFolder};
pub use metadata::{FileMetadata, FileRepository, NewFile};
pub use registry::{FileRegistry, NewUpload};
pub use storage::LocalBlobStore;

use crate::{DrawerError, Result};

/// Reserved folder id meaning "no folder".
pub const ROOT_SENTINEL: &str = "root";

/// Default maximum upload size (10MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Parse a record identifier supplied by a caller.
///
/// `what` names the identifier in the error message ("folder", "file").
pub fn parse_id(raw: &str, what: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| DrawerError::InvalidInput(format!("Invalid {what} ID format.")))
}

/// Where an uploaded or moved file should live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderTarget {
    /// No folder.
    Root,
    /// A folder id, not yet ownership-checked.
    Folder(i64),
}

impl FolderTarget {
    /// Resolve a caller-supplied target.
    ///
    /// Absent, blank, and `"root"` all mean the root.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim) {
            None | Some("") | Some(ROOT_SENTINEL) => Ok(FolderTarget::Root),
            Some(s) => parse_id(s, "folder").map(FolderTarget::Folder),
        }
    }

    /// Resolve the target of a move.
    ///
    /// Only absent and `"root"` mean the root; a blank string is an
    /// invalid id.
    pub fn parse_move(raw: Option<&str>) -> Result<Self> {
        match raw {
            None | Some(ROOT_SENTINEL) => Ok(FolderTarget::Root),
            Some(s) => parse_id(s, "folder").map(FolderTarget::Folder),
        }
    }
}

/// Filter applied when listing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderFilter {
    /// Every file of the owner.
    All,
    /// Files without a folder.
    Root,
    /// Files in the given folder.
    Folder(i64),
}

impl FolderFilter {
    /// Resolve a `folderId` query value.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None | Some("") => Ok(FolderFilter::All),
            Some(ROOT_SENTINEL) => Ok(FolderFilter::Root),
            Some(s) => parse_id(s, "folder").map(FolderFilter::Folder),
        }
    }
}

/// Validate and trim a folder name.
pub fn normalize_folder_name(name: Option<&str>) -> Result<String> {
    let trimmed = name.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(DrawerError::InvalidInput(
            "Folder name is required and must be a non-empty string.".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
