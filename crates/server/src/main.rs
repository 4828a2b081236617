//! # server
//!
//! REST API server for the financial forecasting engine.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use prediction_facade::{
    EngineConfig, InMemoryCategories, InMemoryLedger, InMemoryPredictionStore, PredictionService,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod error;
mod fixture;
mod routes;

use routes::AppState;

const PURGE_INTERVAL: Duration = Duration::from_secs(3600);

#[derive(Debug, Parser)]
#[command(name = "server", version, about = "Financial forecasting REST API")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// JSON array of ledger entries to serve from memory
    #[arg(long, env = "LEDGER_FIXTURE")]
    ledger_fixture: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "server=info,prediction_core=info,accuracy_core=info,tower_http=info".into()
            }),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;

    let entries = match &cli.ledger_fixture {
        Some(path) => {
            let entries = fixture::load_entries(path)?;
            tracing::info!(path = %path.display(), entries = entries.len(), "loaded ledger fixture");
            entries
        }
        None => {
            tracing::warn!("no ledger fixture configured, starting with an empty ledger");
            Vec::new()
        }
    };
    let categories = InMemoryCategories::from_entries(&entries);
    let ledger = InMemoryLedger::from_entries(entries);

    let service = PredictionService::new(
        config,
        Arc::new(ledger),
        Arc::new(categories),
        Arc::new(InMemoryPredictionStore::new()),
    )?;

    spawn_purge(service.clone());

    let app = routes::router(AppState { service });
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    tracing::info!("server v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Drop expired predictions once an hour.
fn spawn_purge(service: PredictionService) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = service.purge_expired().await {
                tracing::warn!(error = %e, "purge failed");
            }
        }
    });
}
