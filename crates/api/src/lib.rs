//! HTTP read layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for every report the engine produces
//! - JSON error responses mapped from [`mizan_shared::AppError`]

pub mod error;
pub mod routes;

use axum::Router;
use mizan_core::reports::ReportService;
use mizan_core::store::LedgerStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Report service over the configured ledger store.
    pub reports: ReportService<dyn LedgerStore>,
}

impl AppState {
    /// Creates the state around `reports`.
    #[must_use]
    pub fn new(reports: ReportService<dyn LedgerStore>) -> Self {
        Self { reports }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
