mod catalog;
mod config;
mod db;
mod errors;
mod lifecycle;
mod models;
mod persistence;
mod progress;
mod recommendation;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::persistence::{InMemoryGateway, PersistenceGateway, PgGateway};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting GlowRoutine API v{}", env!("CARGO_PKG_VERSION"));

    // Product catalog
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::builtin(),
    };
    info!("Catalog loaded with {} products", catalog.len());

    // Record store
    let gateway: Arc<dyn PersistenceGateway> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.db_max_connections).await?;
            Arc::new(PgGateway::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; records are kept in memory and lost on restart");
            Arc::new(InMemoryGateway::new())
        }
    };

    if let Some(seed) = config.selection_seed {
        info!("Product selection seeded with {seed}");
    }

    let state = AppState {
        gateway,
        catalog: Arc::new(catalog),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
