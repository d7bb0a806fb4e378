//! Test helpers for Web API integration tests.
//!
//! Provides an in-process server, user/token helpers, and a blob store
//! double whose failures can be switched on.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use filedrawer::web::router::create_router;
use filedrawer::web::AppState;
use filedrawer::{BlobStore, Database, DrawerError, JwtKeys, LocalBlobStore, StoredBlob};
use serde_json::{json, Value};
use tempfile::TempDir;

/// JWT secret used by every test server.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Password used for every test user.
pub const TEST_PASSWORD: &str = "password123";

/// A running test server and the collaborators behind it.
pub struct TestApp {
    /// In-process HTTP server.
    pub server: TestServer,
    /// The database the server writes to.
    pub db: Arc<Database>,
    /// Keeps the local blob directory alive for the test.
    _blob_dir: Option<TempDir>,
}

fn build_app(
    db: Arc<Database>,
    blobs: Arc<dyn BlobStore>,
    max_upload_size: Option<usize>,
) -> TestServer {
    let jwt = Arc::new(JwtKeys::new(TEST_SECRET, 900));
    let mut state = AppState::new(db, blobs, jwt);
    if let Some(bytes) = max_upload_size {
        state = state.with_max_upload_size(bytes);
    }

    let router = create_router(Arc::new(state), &[]);
    TestServer::new(router).expect("Failed to create test server")
}

/// Create a test server backed by an in-memory database and a local blob
/// store in a temporary directory.
pub async fn create_test_app() -> TestApp {
    let blob_dir = TempDir::new().expect("Failed to create blob directory");
    let blobs = Arc::new(
        LocalBlobStore::new(blob_dir.path(), "http://files.test")
            .expect("Failed to create blob store"),
    );
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );

    TestApp {
        server: build_app(db.clone(), blobs, None),
        db,
        _blob_dir: Some(blob_dir),
    }
}

/// Create a test server using the given blob store.
pub async fn create_test_app_with_blobs(blobs: Arc<dyn BlobStore>) -> TestApp {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );

    TestApp {
        server: build_app(db.clone(), blobs, None),
        db,
        _blob_dir: None,
    }
}

/// Create a test server with a custom upload limit in bytes.
pub async fn create_test_app_with_limit(max_upload_size: usize) -> TestApp {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );

    TestApp {
        server: build_app(
            db.clone(),
            Arc::new(SwitchableBlobStore::default()),
            Some(max_upload_size),
        ),
        db,
        _blob_dir: None,
    }
}

/// Register a user and return the response body.
pub async fn register_user(server: &TestServer, username: &str, password: &str) -> Value {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

/// Log in and return the access token.
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()["data"]["accessToken"]
        .as_str()
        .expect("No access token")
        .to_string()
}

/// Register a user with the test password and return a token for them.
pub async fn create_user_token(server: &TestServer, username: &str) -> String {
    register_user(server, username, TEST_PASSWORD).await;
    login(server, username, TEST_PASSWORD).await
}

/// `Authorization` header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Blob store kept in memory, with switchable failures.
#[derive(Default)]
pub struct SwitchableBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    next_id: Mutex<u64>,
    /// Make `store` fail.
    pub fail_store: AtomicBool,
    /// Make `remove` fail.
    pub fail_remove: AtomicBool,
}

impl SwitchableBlobStore {
    /// Number of blobs currently held.
    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    /// Switch upload failures on or off.
    pub fn set_fail_store(&self, fail: bool) {
        self.fail_store.store(fail, Ordering::SeqCst);
    }

    /// Switch removal failures on or off.
    pub fn set_fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for SwitchableBlobStore {
    async fn store(&self, content: &[u8], _filename: &str) -> filedrawer::Result<StoredBlob> {
        if self.fail_store.load(Ordering::SeqCst) {
            return Err(DrawerError::Blob("blob service unavailable".to_string()));
        }

        let stored_id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            format!("mem-{}", *next_id)
        };
        self.blobs
            .lock()
            .unwrap()
            .insert(stored_id.clone(), content.to_vec());

        Ok(StoredBlob {
            url: format!("memory://{stored_id}"),
            stored_id,
        })
    }

    async fn remove(&self, stored_id: &str) -> filedrawer::Result<()> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(DrawerError::Blob("blob service unavailable".to_string()));
        }
        self.blobs.lock().unwrap().remove(stored_id);
        Ok(())
    }
}
