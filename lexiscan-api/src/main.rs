//! lexiscan-api - Account and assessment-result service
//!
//! HTTP backend for the dyslexia-screening client: password-based signup
//! and login issuing short-lived bearer tokens, plus append-only storage
//! and retrieval of assessment results for registered users and guests.

use anyhow::Result;
use clap::Parser;
use lexiscan_api::{build_router, AppState};
use lexiscan_common::{db, Config};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "lexiscan-api", version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "LEXISCAN_CONFIG")]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting lexiscan-api v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    info!("Database path: {}", config.database_path.display());

    // The process cannot serve any request without a working storage
    // connection, so a failure here is fatal.
    let pool = match db::init_database(&config.database_path).await {
        Ok(pool) => {
            info!("Database connection established");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("lexiscan-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
