//! Logging setup for File Drawer.
//!
//! `RUST_LOG` wins when set. Otherwise the configured level applies to this
//! crate and the HTTP trace layer, and dependencies log warnings only.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Parse log level string to tracing Level.
fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Filter directives used when `RUST_LOG` is not set.
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    format!("warn,filedrawer={level},tower_http={level}")
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(parse_level(level))))
}

/// Initialize logging to stdout and the configured log file.
///
/// The log file is appended to, so restarts keep earlier entries.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let path = Path::new(&config.file);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let log_file = Arc::new(OpenOptions::new().create(true).append(true).open(path)?);
    let writer = std::io::stdout.and(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(build_filter(&config.level))
        .init();

    Ok(())
}

/// Console-only fallback when the log file cannot be opened.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(build_filter(level))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level(" DEBUG "), Level::DEBUG);
        assert_eq!(parse_level("warning"), Level::WARN);
        assert_eq!(parse_level("Error"), Level::ERROR);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives(Level::INFO),
            "warn,filedrawer=info,tower_http=info"
        );
        assert_eq!(
            default_directives(Level::DEBUG),
            "warn,filedrawer=debug,tower_http=debug"
        );
    }

    #[test]
    fn test_default_directives_parse() {
        let filter = EnvFilter::new(default_directives(Level::WARN));
        assert!(filter.to_string().contains("filedrawer=warn"));
    }
}
