//! mini-apis Server
//!
//! Serves the quotemaster API from a JSON document on disk.
//!
//! # Configuration
//!
//! Environment variables:
//! - `MINI_APIS_PORT`: Port to listen on (default: 5678)
//! - `MINI_APIS_DATA_DIR`: Directory to store documents (default: ~/.local/share/mini-apis)
//! - `MINI_APIS_RESET_HASH`: base64 SHA-256 of the quote reset password
//! - `MINI_APIS_CONFIG`: Path to config file (default: ~/.config/mini-apis/config.yaml)
//!
//! # Config File Format
//!
//! ```yaml
//! port: 5678
//! data_dir: /var/lib/mini-apis
//! reset_hash: "dX2+ujAOKQmKLSaOE7DXKRcz832YgaJupwXe0Q5Sqnw="
//! ```
//!
//! # Endpoints
//!
//! - `ANY /handshake`: Liveness check
//! - `/quotemaster/*`: See `mini_apis::server::quotemaster`

use mini_apis::config::Config;
use mini_apis::server::{router, AppState};
use mini_apis_core::{PlannerRepository, QuoteRepository};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mini_apis=info,mini_apis_core=info,mini_apis_server=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(None)?;
    tracing::info!("Data directory: {}", config.data_dir.display());

    let quotes = QuoteRepository::open(config.quotes_path(), config.reset_hash.clone())?;

    // Not served over HTTP, but bootstrapped so the admin CLI finds a document.
    PlannerRepository::open(config.planner_path())?;

    let app = router(AppState::new(quotes));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
