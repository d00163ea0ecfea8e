//! mwl-api - MadWildlife sighting backend
//!
//! REST service for user profiles, the temp-log/finalize sighting workflow,
//! field-note logs, and time-decaying active sightings, persisted in SQLite.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use mwl_api::{build_router, AppState};
use mwl_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};

#[derive(Parser, Debug)]
#[command(name = "mwl-api", about = "MadWildlife sighting backend")]
struct Args {
    /// Root folder holding mwl.db (falls back to MWL_ROOT_FOLDER, the config
    /// file, then the platform data directory)
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// TCP port to listen on
    #[arg(long, env = "MWL_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber before anything else
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Build identification immediately after tracing init, before any
    // database delays
    info!(
        "Starting MadWildlife backend (mwl-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let resolver = RootFolderResolver::with_cli_override("mwl-api", args.root_folder);
    let root_folder = resolver.resolve();

    let initializer = RootFolderInitializer::new(root_folder);
    initializer.ensure_directory_exists()?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match mwl_common::db::init::init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool);
    let app = build_router(state);

    let port = args.port.or_else(|| TomlConfig::load().port).unwrap_or(8080);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("mwl-api listening on http://0.0.0.0:{}", port);
    info!("Health check: http://0.0.0.0:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}
