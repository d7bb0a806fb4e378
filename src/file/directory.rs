//! Folder directory for File Drawer.
//!
//! High-level folder operations for an already-authenticated owner:
//! - Name validation and per-owner uniqueness
//! - Owner-scoped lookups that report foreign folders as missing
//! - Atomic owner-scoped deletion

use sqlx::SqlitePool;
use tracing::info;

use super::folder::{Folder, FolderRepository, NewFolder};
use super::metadata::{FileMetadata, FileRepository};
use super::{normalize_folder_name, parse_id};
use crate::{DrawerError, Result};

/// A folder together with the files it contains.
#[derive(Debug, Clone)]
pub struct FolderWithFiles {
    /// The folder.
    pub folder: Folder,
    /// Files in the folder, ordered by filename.
    pub files: Vec<FileMetadata>,
}

/// Folder operations scoped to one owner at a time.
pub struct FolderDirectory<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FolderDirectory<'a> {
    /// Create a new FolderDirectory.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    fn not_found() -> DrawerError {
        DrawerError::NotFound("Folder not found or access denied.".to_string())
    }

    /// List the owner's folders ordered by name.
    pub async fn list(&self, owner_id: i64) -> Result<Vec<Folder>> {
        FolderRepository::new(self.pool).list_by_owner(owner_id).await
    }

    /// Create a folder.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the name is missing or blank
    /// - `Conflict` if the owner already has a folder with the trimmed name
    pub async fn create(&self, owner_id: i64, name: Option<&str>) -> Result<Folder> {
        let name = normalize_folder_name(name)?;
        let repo = FolderRepository::new(self.pool);

        if repo.find_by_name(owner_id, &name, None).await?.is_some() {
            return Err(DrawerError::Conflict("folder already exists".to_string()));
        }

        // A concurrent creator can slip past the check above; the unique
        // constraint then rejects the insert and `create` reports Conflict.
        let folder = repo.create(&NewFolder::new(owner_id, name)).await?;
        info!(user_id = owner_id, folder_id = folder.id, name = %folder.name, "Folder created");

        Ok(folder)
    }

    /// Get a folder with its files.
    pub async fn get(&self, owner_id: i64, folder_id: &str) -> Result<FolderWithFiles> {
        let folder_id = parse_id(folder_id, "folder")?;

        let folder = FolderRepository::new(self.pool)
            .get_owned(folder_id, owner_id)
            .await?
            .ok_or_else(Self::not_found)?;

        let files = FileRepository::new(self.pool)
            .list_by_folder(folder.id)
            .await?;

        Ok(FolderWithFiles { folder, files })
    }

    /// Rename a folder.
    ///
    /// Renaming to the current name is a no-op that still succeeds.
    pub async fn rename(
        &self,
        owner_id: i64,
        folder_id: &str,
        new_name: Option<&str>,
    ) -> Result<Folder> {
        let folder_id = parse_id(folder_id, "folder")?;
        let name = normalize_folder_name(new_name)?;
        let repo = FolderRepository::new(self.pool);

        let current = repo
            .get_owned(folder_id, owner_id)
            .await?
            .ok_or_else(Self::not_found)?;

        if name != current.name
            && repo
                .find_by_name(owner_id, &name, Some(folder_id))
                .await?
                .is_some()
        {
            return Err(DrawerError::Conflict(format!(
                "Another folder with name \"{name}\" already exists."
            )));
        }

        let folder = repo
            .rename(folder_id, owner_id, &name)
            .await?
            .ok_or_else(Self::not_found)?;
        info!(user_id = owner_id, folder_id, name = %folder.name, "Folder renamed");

        Ok(folder)
    }

    /// Delete a folder. Its files move to the root.
    pub async fn delete(&self, owner_id: i64, folder_id: &str) -> Result<()> {
        let folder_id = parse_id(folder_id, "folder")?;

        if !FolderRepository::new(self.pool)
            .delete_owned(folder_id, owner_id)
            .await?
        {
            return Err(Self::not_found());
        }

        info!(user_id = owner_id, folder_id, "Folder deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::file::NewFile;
    use crate::Database;

    async fn setup_db() -> (Database, i64, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        let alice = users.create(&NewUser::new("alice", "hash")).await.unwrap();
        let bob = users.create(&NewUser::new("bob", "hash")).await.unwrap();
        (db, alice.id, bob.id)
    }

    async fn add_file(db: &Database, owner: i64, filename: &str, folder_id: Option<i64>) -> i64 {
        FileRepository::new(db.pool())
            .create(&NewFile {
                filename: filename.to_string(),
                stored_id: format!("{owner}-{filename}"),
                url: format!("http://blobs/{owner}-{filename}"),
                mime_type: "text/plain".to_string(),
                size: 4,
                user_id: owner,
                folder_id,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_trims_and_conflicts() {
        let (db, alice, _) = setup_db().await;
        let dir = FolderDirectory::new(db.pool());

        let folder = dir.create(alice, Some(" Docs ")).await.unwrap();
        assert_eq!(folder.name, "Docs");

        let err = dir.create(alice, Some("Docs")).await.unwrap_err();
        assert!(matches!(err, DrawerError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_names() {
        let (db, alice, _) = setup_db().await;
        let dir = FolderDirectory::new(db.pool());

        assert!(matches!(
            dir.create(alice, None).await,
            Err(DrawerError::InvalidInput(_))
        ));
        assert!(matches!(
            dir.create(alice, Some("   ")).await,
            Err(DrawerError::InvalidInput(_))
        ));
        assert!(dir.list(alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_returns_files_and_hides_foreign() {
        let (db, alice, bob) = setup_db().await;
        let dir = FolderDirectory::new(db.pool());
        let folder = dir.create(alice, Some("Invoices")).await.unwrap();
        add_file(&db, alice, "b.pdf", Some(folder.id)).await;
        add_file(&db, alice, "a.pdf", Some(folder.id)).await;
        add_file(&db, alice, "loose.pdf", None).await;

        let found = dir.get(alice, &folder.id.to_string()).await.unwrap();
        assert_eq!(found.folder.name, "Invoices");
        let names: Vec<&str> = found.files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);

        assert!(matches!(
            dir.get(bob, &folder.id.to_string()).await,
            Err(DrawerError::NotFound(_))
        ));
        assert!(matches!(
            dir.get(alice, "9999").await,
            Err(DrawerError::NotFound(_))
        ));
        assert!(matches!(
            dir.get(alice, "abc").await,
            Err(DrawerError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_rename() {
        let (db, alice, bob) = setup_db().await;
        let dir = FolderDirectory::new(db.pool());
        let invoices = dir.create(alice, Some("Invoices")).await.unwrap();
        dir.create(alice, Some("Taken")).await.unwrap();
        let id = invoices.id.to_string();

        let renamed = dir.rename(alice, &id, Some(" Receipts ")).await.unwrap();
        assert_eq!(renamed.name, "Receipts");

        // Same name is allowed
        let same = dir.rename(alice, &id, Some("Receipts")).await.unwrap();
        assert_eq!(same.name, "Receipts");

        assert!(matches!(
            dir.rename(alice, &id, Some("Taken")).await,
            Err(DrawerError::Conflict(_))
        ));
        assert!(matches!(
            dir.rename(alice, &id, Some("")).await,
            Err(DrawerError::InvalidInput(_))
        ));
        assert!(matches!(
            dir.rename(bob, &id, Some("Mine")).await,
            Err(DrawerError::NotFound(_))
        ));
        assert!(matches!(
            dir.rename(alice, "x1", Some("Mine")).await,
            Err(DrawerError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_detaches_files() {
        let (db, alice, bob) = setup_db().await;
        let dir = FolderDirectory::new(db.pool());
        let folder = dir.create(alice, Some("Temp")).await.unwrap();
        let file_id = add_file(&db, alice, "keep.txt", Some(folder.id)).await;
        let id = folder.id.to_string();

        assert!(matches!(
            dir.delete(bob, &id).await,
            Err(DrawerError::NotFound(_))
        ));

        dir.delete(alice, &id).await.unwrap();
        assert!(dir.list(alice).await.unwrap().is_empty());

        let file = FileRepository::new(db.pool())
            .get_owned(file_id, alice)
            .await
            .unwrap()
            .unwrap();
        assert!(file.folder_id.is_none());

        assert!(matches!(
            dir.delete(alice, &id).await,
            Err(DrawerError::NotFound(_))
        ));
    }
}
