//! Mizan report server.
//!
//! Serves point-in-time financial reports computed from the ledger database.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mizan_api::{AppState, create_router};
use mizan_core::reports::ReportService;
use mizan_core::store::LedgerStore;
use mizan_db::{SeaLedgerStore, connect};
use mizan_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mizan=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    let store: Arc<dyn LedgerStore> = Arc::new(SeaLedgerStore::new(db));
    info!(
        fallback_currency = %config.reports.fallback_currency,
        balance_tolerance = %config.reports.balance_tolerance,
        "Report engine configured"
    );
    let state = AppState::new(ReportService::new(store, config.reports));

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
