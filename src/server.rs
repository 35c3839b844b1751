//! Reusable car-share server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database connection,
//! migrations, the REST API and graceful shutdown. The binary is a thin
//! wrapper around it, and tests start it on an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::VehicleGuards;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::interfaces::http::{create_api_router, ApiState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::{init_database, SeaOrmRepositoryProvider};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// # Examples
///
/// ```rust,no_run
/// use carshare::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to (resolves port 0).
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service with the given options.
    ///
    /// This will:
    /// 1. Connect to the database and run migrations (if enabled)
    /// 2. Build the repositories, the per-vehicle guards and the services
    /// 3. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting car-share service...");

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let guards = Arc::new(VehicleGuards::new(app_cfg.engine.guard_timeout()));
        info!(
            "Vehicle guard timeout: {}ms",
            app_cfg.engine.guard_timeout_ms
        );

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(ApiState::new(repos.clone(), guards));

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking). Call [`wait`](Self::wait)
    /// to block until everything has stopped.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered, then
    /// close the database.
    pub async fn wait(self) {
        info!("Waiting for in-flight requests to complete...");

        let api_task = self.api_task;
        let drained = self
            .shutdown
            .drain(async move {
                if let Err(e) = api_task.await {
                    error!("REST API server task panicked: {}", e);
                }
            })
            .await;
        if drained {
            info!("REST API server stopped");
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Car-share service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down car-share service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config. `RUST_LOG`
/// wins over `logging.level`.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
