//! # Horizon Inventory Host - Main Entry Point
//!
//! Headless runtime for inventory sessions and NPC behaviors. This entry
//! point handles CLI parsing, configuration loading, and application
//! lifecycle management.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run with default configuration
//! horizon
//!
//! # Specify custom configuration
//! horizon --config production.toml
//!
//! # Override specific settings
//! horizon --tick-interval 20 --log-level debug
//!
//! # JSON logging for production
//! horizon --json-logs
//! ```
//!
//! ## Configuration
//!
//! The runtime loads configuration from a TOML file (default: `config.toml`).
//! If the file doesn't exist, a default configuration will be created.
//!
//! ## Signal Handling
//!
//! Shuts down gracefully on SIGINT (Ctrl+C) and SIGTERM (Unix systems),
//! closing every open inventory session first.

use tracing::error;

mod app;
mod cli;
mod config;
mod host;
mod logging;
mod signals;

pub use app::Application;
pub use cli::CliArgs;
pub use config::{AppConfig, InventorySettings, LoggingSettings, RuntimeSettings};
pub use host::{log_notifications, LoggingDisplay};

/// Main entry point for the Horizon host.
///
/// # Exit Codes
///
/// * **0**: Successful execution and shutdown
/// * **1**: Error during startup, configuration, or runtime
///
/// Called from `main` inside the tokio runtime.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Load configuration to get logging settings
    let mut config = AppConfig::load_from_file(&args.config_path)
        .await
        .unwrap_or_default();
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    if let Err(e) = logging::setup_logging(&config.logging, args.json_logs) {
        eprintln!("❌ Failed to setup logging: {e}");
        std::process::exit(1);
    }

    match Application::new(args).await {
        Ok(app) => {
            if let Err(e) = app.run().await {
                error!("❌ Application error: {:?}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("❌ Failed to start application: {e:?}");
            std::process::exit(1);
        }
    }

    Ok(())
}
