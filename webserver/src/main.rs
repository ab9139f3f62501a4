//! WebServer entry point
//!
//! Loads `.env`, parses arguments, picks the SQLite or memory store, wires the
//! breed registry client into the services and serves until Ctrl+C.

use anyhow::Context;
use clap::Parser;
use shared::{component_warn, logging, Component};

use agency::{RealBreedValidator, RealMemoryStore, RealSqliteStore};
use webserver::{AgencyStore, Args, ServerConfig, WebServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    let config = Args::parse().into_config()?;

    logging::init_tracing(&config.log_level);

    let validator =
        RealBreedValidator::new(&config.breed_registry).context("failed to build breed registry client")?;

    match config.database_path.clone() {
        Some(path) => {
            let store = RealSqliteStore::open(&path)
                .with_context(|| format!("failed to open database {}", path.display()))?;
            serve(config, store, validator).await?;
        }
        None => {
            component_warn!(Component::Store, "⚠️ DATABASE_URL not set, records are kept in memory only");
            serve(config, RealMemoryStore::new(), validator).await?;
        }
    }

    logging::log_success(Component::Api, "WebServer stopped gracefully");
    Ok(())
}

async fn serve<S: AgencyStore>(config: ServerConfig, store: S, validator: RealBreedValidator) -> anyhow::Result<()> {
    WebServer::new(config, store, validator).run().await?;
    Ok(())
}
