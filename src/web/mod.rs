//! Web API module for File Drawer.
//!
//! This module provides the REST API over folders and files, plus the
//! authentication endpoints that issue the bearer tokens it requires.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
