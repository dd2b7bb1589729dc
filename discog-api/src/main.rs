//! discog-api - read-only discography catalog service
//!
//! Serves albums, songs and band members from a SQLite catalog as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use discog_api::api::buildinfo::BuildInfo;
use discog_api::{build_router, db, AppState};
use discog_common::config::{ConfigOverrides, ConfigSource, ServiceConfig};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for discog-api
#[derive(Parser, Debug)]
#[command(name = "discog-api")]
#[command(about = "Read-only JSON API over a band discography catalog")]
#[command(version)]
struct Args {
    /// Config file (default: platform config dir, then /etc/discog)
    #[arg(short, long, env = "DISCOG_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite catalog database
    #[arg(short, long, env = "DISCOG_DATABASE")]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "DISCOG_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "DISCOG_PORT")]
    port: Option<u16>,

    /// Band name reported in responses and used in the route prefix
    #[arg(long, env = "DISCOG_BAND")]
    band: Option<String>,

    /// Treat album name as identity in album-by-name lookups
    #[arg(long, env = "DISCOG_MERGE_ALBUMS_BY_NAME")]
    merge_albums_by_name: Option<bool>,

    /// Log level when RUST_LOG is not set
    #[arg(long, env = "DISCOG_LOG_LEVEL")]
    log_level: Option<String>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            config_file: args.config,
            database_path: args.database,
            host: args.host,
            port: args.port,
            band: args.band,
            merge_albums_by_name: args.merge_albums_by_name,
            log_level: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServiceConfig::resolve(args.into()).context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "discog_api={level},discog_common={level},tower_http={level}",
                    level = config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let build = BuildInfo::current();
    info!(
        "Starting discog-api v{} [{}] built {} ({})",
        build.version, build.git_hash, build.build_timestamp, build.build_profile
    );

    match &config.source {
        ConfigSource::File(path) => info!("Config file: {}", path.display()),
        ConfigSource::Defaults => info!("No config file found, using defaults"),
    }
    info!("Database path: {}", config.database_path.display());

    if !config.database_path.exists() {
        warn!(
            "Database not found at {}; requests will fail until it exists",
            config.database_path.display()
        );
    }

    let pool = db::connect_readonly(&config.database_path);
    log_catalog_summary(&pool).await;

    let api_prefix = config.api_prefix();
    let state = AppState::new(pool, config.band.as_str())
        .with_merge_albums_by_name(config.merge_albums_by_name);
    if config.merge_albums_by_name {
        info!("Album-by-name lookups merge same-named albums");
    }

    let app = build_router(state, &api_prefix);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", config.host, config.port))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;
    info!("discog-api listening on http://{}{}", addr, api_prefix);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Log row counts of the catalog tables; never fatal
async fn log_catalog_summary(pool: &sqlx::SqlitePool) {
    match db::list_catalog_tables(pool).await {
        Ok(tables) => {
            for table in tables {
                match table.row_count {
                    Some(count) => info!("  - {} ({} rows)", table.name, count),
                    None => warn!("  - {} missing from database", table.name),
                }
            }
        }
        Err(e) => warn!("Could not read catalog tables: {}", e),
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
