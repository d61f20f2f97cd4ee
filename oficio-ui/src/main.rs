//! oficio-ui — Gerador de Ofício workflow service
//!
//! Drives the production of a formal payment-authorization letter from
//! scanned payment authorizations: extraction, human confirmation of the
//! debit account, account-grouped aggregation, signatory management and the
//! final rendering request.

use anyhow::Result;
use clap::Parser;
use oficio_common::config::ServiceConfig;
use oficio_common::signatories::SignatoryRegistry;
use oficio_ui::clients::{ExtractionClient, GenerationClient};
use oficio_ui::AppState;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "oficio-ui",
    about = "Client-side workflow service for the Gerador de Ofício"
)]
struct Args {
    /// Listen port (overrides config file and environment)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database path
    #[arg(long)]
    database: Option<std::path::PathBuf>,

    /// Extraction backend base URL
    #[arg(long)]
    extraction_url: Option<String>,

    /// Rendering backend base URL
    #[arg(long)]
    generation_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = ServiceConfig::load();
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database) = args.database {
        config.database_path = database;
    }
    if let Some(url) = args.extraction_url {
        config.extraction_url = url;
    }
    if let Some(url) = args.generation_url {
        config.generation_url = url;
    }

    info!("Starting oficio-ui (Gerador de Ofício workflow service)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", config.database_path.display());
    info!("Extraction backend: {}", config.extraction_url);
    info!("Rendering backend: {}", config.generation_url);

    let db = oficio_common::db::init_database(&config.database_path).await?;

    let registry = SignatoryRegistry::new(db);
    let profiles = registry.load_or_seed().await?;
    info!(count = profiles.len(), "Signatory profiles available");

    let extraction = ExtractionClient::new(&config.extraction_url)?;
    let generation = GenerationClient::new(&config.generation_url)?;

    let state = AppState::new(registry, extraction, generation);
    let app = oficio_ui::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
