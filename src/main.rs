//! Car-share service
//!
//! Booking and lock coordination REST service for a car-share fleet.
//!
//! ```sh
//! # Run with default config (~/.config/carshare/config.toml)
//! carshare-service
//!
//! # Custom config path and database
//! carshare-service --config /etc/carshare/config.toml --database-url sqlite://./fleet.db?mode=rwc
//!
//! # Validate config without starting
//! carshare-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use carshare::config::AppConfig;
use carshare::server::{init_tracing, ServerHandle, ServerOptions};

/// Car-share booking and lock coordination service.
#[derive(Parser, Debug)]
#[command(
    name = "carshare-service",
    version,
    about = "Booking and lock coordination for a car-share fleet",
    long_about = "REST API server that books cars, authorizes lock/unlock requests \
                  against bookings and tracks vehicle positions.\n\n\
                  Default config: ~/.config/carshare/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CARSHARE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the database URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(carshare::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            if cli.check {
                eprintln!("Configuration is invalid: {}", e);
                return Err(e.into());
            }
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(url) = cli.database_url {
        info!("CLI override: database_url = {}", url);
        config.database.url = url;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file   : {}", config_path.display());
        println!("   API address   : {}", config.server.address());
        println!("   Database      : {}", config.database.url);
        println!("   Log level     : {}", config.logging.level);
        println!("   Guard timeout : {}ms", config.engine.guard_timeout_ms);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
