//! Web server for File Drawer.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::auth::JwtKeys;
use crate::config::Config;
use crate::file::BlobStore;
use crate::{Database, DrawerError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_router, create_swagger_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(
        host: &str,
        port: u16,
        app_state: AppState,
        cors_origins: Vec<String>,
    ) -> Result<Self> {
        let addr = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .map_err(|e| {
                DrawerError::Config(format!("invalid server address {host}:{port}: {e}"))
            })?;

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origins,
        })
    }

    /// Create a web server from the loaded configuration.
    pub fn from_config(config: &Config, db: Database, blobs: Arc<dyn BlobStore>) -> Result<Self> {
        let jwt = Arc::new(JwtKeys::new(
            &config.auth.jwt_secret,
            config.auth.token_expiry_secs,
        ));
        let app_state = AppState::new(Arc::new(db), blobs, jwt)
            .with_max_upload_size(config.storage.max_upload_bytes());

        Self::new(
            &config.server.host,
            config.server.port,
            app_state,
            config.server.cors_origins.clone(),
        )
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn into_router(self) -> Router {
        create_router(self.app_state, &self.cors_origins)
            .merge(create_health_router())
            .merge(create_swagger_router())
    }

    /// Run the web server.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        let router = self.into_router();

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the bound address.
    ///
    /// Binding to port 0 picks a free port.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        let router = self.into_router();

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
