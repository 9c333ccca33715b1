//! Billing service runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: database init, migrations,
//! the bootstrap admin, the REST API, the billing scheduler, metrics, and
//! graceful shutdown. The CLI binary is a thin wrapper around it.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::billing::start_billing_scheduler;
use crate::application::{PaymentGateway, SimulatedGateway, UserService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, SeaOrmRepositoryProvider};
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::{create_api_router, ApiServices};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the billing service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured admin if no admin exists (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running billing service.
///
/// ```rust,no_run
/// use nexuspay::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub services: ApiServices,
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub api_addr: std::net::SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
    scheduler_task: Option<tokio::task::JoinHandle<()>>,
}

impl ServerHandle {
    /// Start the service.
    ///
    /// 1. Install the Prometheus recorder
    /// 2. Connect to the database and run migrations
    /// 3. Create the default admin (if enabled)
    /// 4. Start the billing scheduler
    /// 5. Start the REST API (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting NexusPay billing service...");

        let prometheus_handle = prometheus_handle();

        // ── Configs ────────────────────────────────────────────
        let db_config = app_cfg.database.to_database_config();
        let jwt_config = app_cfg.security.jwt_config();
        let policy = app_cfg.billing.policy()?;
        info!(
            expiration_hours = jwt_config.expiration_hours,
            "JWT configured"
        );

        // ── Database ───────────────────────────────────────────
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repositories & services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let gateway: Arc<dyn PaymentGateway> =
            Arc::new(SimulatedGateway::new(app_cfg.billing.payment_success_rate));
        let services = ApiServices::new(repos.clone(), gateway, policy, jwt_config.clone());

        if opts.create_default_admin {
            create_default_admin(&services.users, &app_cfg).await;
        }

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── Background tasks ───────────────────────────────────
        let scheduler_task = start_billing_scheduler(
            repos.clone(),
            services.bills.clone(),
            services.payments.clone(),
            shutdown_signal.clone(),
            app_cfg.billing.scheduler_interval_secs,
        );

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(
            services.clone(),
            jwt_config,
            HealthState::new(Some(db.clone())),
            prometheus_handle,
        );

        let listener = tokio::net::TcpListener::bind(app_cfg.server.api_address()).await?;
        let api_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!(error = %e, "REST API server error");
            }
        });

        Ok(Self {
            repos,
            services,
            config: app_cfg,
            api_addr,
            db,
            shutdown,
            api_task,
            scheduler_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting for it.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    pub async fn wait(self) {
        info!("Waiting for server tasks to complete...");

        let api_task = self.api_task;
        let scheduler_task = self.scheduler_task;
        let drained = self
            .shutdown
            .drain(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!(error = %e, "REST API server task panicked"),
                }
                if let Some(task) = scheduler_task {
                    if let Err(e) = task.await {
                        error!(error = %e, "Billing scheduler task panicked");
                    }
                }
            })
            .await;
        if !drained {
            warn!("Abandoning in-flight requests");
        }

        if let Err(e) = self.db.close().await {
            warn!(error = %e, "Error closing database connection");
        } else {
            info!("Database connection closed");
        }

        info!("NexusPay shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down billing service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global recorder can only be installed once per process, so a restart
/// within the same process reuses the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Some(handle.clone());
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            info!("Prometheus metrics recorder installed");
            Some(PROM_HANDLE.get_or_init(|| handle).clone())
        }
        Err(e) => {
            warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled");
            None
        }
    }
}

async fn create_default_admin(users: &UserService, app_cfg: &AppConfig) {
    let admin = &app_cfg.admin;
    match users
        .ensure_admin(&admin.email, &admin.name, &admin.password)
        .await
    {
        Ok(true) => {
            info!(email = admin.email.as_str(), "Default admin created");
            warn!("Please change the default admin password");
        }
        Ok(false) => {}
        Err(e) => error!(error = %e, "Failed to create admin user"),
    }
}

/// Initialize tracing from the application config.
///
/// Call once at process startup, before [`ServerHandle::start`]. `RUST_LOG`
/// takes precedence over `logging.level`.
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

// ── Tests ──────────────────────────────────────────────────────
