use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trove_core::constants::{GEOCODE_TIMEOUT_SECS, NOMINATIM_URL, PHOTON_URL};
use trove_core::{env_opt, env_parse_with_default, AppConfig, ArtifactFilter};
use trove_geocode::LocationResolver;
use trove_http::{create_router, AppState, SessionCredentials};
use trove_service::{ArtifactService, MediaStore};
use trove_storage::Storage;

#[derive(Parser)]
#[command(name = "trove")]
#[command(about = "Inventory service for archaeological artifacts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (requires TROVE_USERNAME and TROVE_PASSWORD).
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// List artifacts as JSON, newest first.
    List {
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Substring search over name, description, and original location.
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long)]
        era: Option<String>,
        #[arg(short, long)]
        material: Option<String>,
    },
    /// Print a single artifact by id.
    Get { id: i64 },
    /// Delete an artifact and its files.
    Delete { id: i64 },
    /// Resolve a free-text location to coordinates (no record created).
    Resolve { location: String },
}

fn get_db_path() -> PathBuf {
    env_opt("TROVE_DB_PATH").map_or_else(|| PathBuf::from("trove.db"), PathBuf::from)
}

fn build_resolver() -> Result<LocationResolver> {
    let nominatim = env_opt("TROVE_NOMINATIM_URL").unwrap_or_else(|| NOMINATIM_URL.to_owned());
    let photon = env_opt("TROVE_PHOTON_URL").unwrap_or_else(|| PHOTON_URL.to_owned());
    let timeout = env_parse_with_default("TROVE_GEOCODE_TIMEOUT_SECS", GEOCODE_TIMEOUT_SECS);
    Ok(LocationResolver::new(&nominatim, &photon, Duration::from_secs(timeout))?)
}

fn build_service(storage: Arc<Storage>) -> Result<Arc<ArtifactService>> {
    let upload_dir = env_opt("TROVE_UPLOAD_DIR").unwrap_or_else(|| "uploads".to_owned());
    let public_url =
        env_opt("TROVE_PUBLIC_URL").unwrap_or_else(|| "http://127.0.0.1:8080".to_owned());
    Ok(Arc::new(ArtifactService::new(
        storage,
        Arc::new(build_resolver()?),
        MediaStore::new(upload_dir)?,
        public_url,
    )))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => {
            let config = AppConfig::from_env()?;
            let storage = Arc::new(Storage::new(&config.db_path)?);
            let resolver = Arc::new(LocationResolver::new(
                &config.nominatim_url,
                &config.photon_url,
                Duration::from_secs(config.geocode_timeout_secs),
            )?);
            let media = MediaStore::new(&config.upload_dir)?;
            let artifacts = Arc::new(ArtifactService::new(
                storage,
                resolver,
                media,
                config.public_url.clone(),
            ));
            let state = Arc::new(AppState::new(
                artifacts,
                SessionCredentials { username: config.username, password: config.password },
            ));
            let router = create_router(state);
            let addr = format!("{host}:{port}");
            tracing::info!("Starting HTTP server on {}", addr);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, router).await?;
        },
        Commands::List { limit, query, era, material } => {
            let storage = Storage::new(&get_db_path())?;
            let filter = ArtifactFilter { query, era, material, limit };
            let artifacts = storage.list_artifacts(&filter)?;
            println!("{}", serde_json::to_string_pretty(&artifacts)?);
        },
        Commands::Get { id } => {
            let storage = Storage::new(&get_db_path())?;
            match storage.get_artifact(id)? {
                Some(artifact) => println!("{}", serde_json::to_string_pretty(&artifact)?),
                None => println!("Artifact not found: {id}"),
            }
        },
        Commands::Delete { id } => {
            let storage = Arc::new(Storage::new(&get_db_path())?);
            let service = build_service(storage)?;
            match service.delete(id).await? {
                Some(removed) => {
                    println!("Deleted {} ({})", removed.inventory_number, removed.name);
                },
                None => println!("Artifact not found: {id}"),
            }
        },
        Commands::Resolve { location } => {
            let resolver = build_resolver()?;
            match resolver.resolve(&location).await {
                Some(coord) => println!("{coord}"),
                None => println!("unresolved"),
            }
        },
    }

    Ok(())
}
