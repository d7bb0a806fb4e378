use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use filedrawer::{Config, Database, LocalBlobStore, WebServer};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load_with_env(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {CONFIG_PATH}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = filedrawer::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        filedrawer::logging::init_console_only(&config.logging.level);
    }

    info!("File Drawer starting");

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> filedrawer::Result<()> {
    config.validate()?;

    let db = Database::open(&config.database.path).await?;
    info!("Database ready at {}", config.database.path);

    let blobs = Arc::new(LocalBlobStore::new(
        &config.storage.path,
        &config.storage.public_base_url,
    )?);
    info!("Blob storage initialized at: {}", config.storage.path);

    let server = WebServer::from_config(&config, db, blobs)?;
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    server.run().await?;
    Ok(())
}
