//! NexusPay billing service, CLI server
//!
//! ```sh
//! # Run with default config (~/.config/nexuspay/config.toml)
//! nexuspay-server
//!
//! # Custom config path
//! nexuspay-server --config /etc/nexuspay/config.toml
//!
//! # Validate config without starting
//! nexuspay-server --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use nexuspay::config::AppConfig;
use nexuspay::server::{init_tracing, ServerHandle, ServerOptions};

/// NexusPay subscription billing and sales analytics server.
#[derive(Parser, Debug)]
#[command(
    name = "nexuspay-server",
    version,
    about = "Subscription billing and sales analytics REST API",
    long_about = "NexusPay billing service: plans, subscriptions, bills, payments \
                  with retry, and sales invoices over a JWT-protected REST API.\n\n\
                  Default config: ~/.config/nexuspay/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "NEXUSPAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(nexuspay::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) if cli.check => {
            eprintln!("Configuration is invalid: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.api_address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Scheduler   : every {}s", config.billing.scheduler_interval_secs);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
