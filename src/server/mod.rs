pub mod api;
pub mod pages;
pub mod render;

use axum::{extract::FromRef, routing::get, Router};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use crate::services::{SharedHealthStats, SharedQuoteStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub quotes: SharedQuoteStore,
    pub health_stats: SharedHealthStats,
}

// FromRef implementations to extract specific state components
impl FromRef<AppState> for SharedQuoteStore {
    fn from_ref(app_state: &AppState) -> SharedQuoteStore {
        app_state.quotes.clone()
    }
}

impl FromRef<AppState> for SharedHealthStats {
    fn from_ref(app_state: &AppState) -> SharedHealthStats {
        app_state.health_stats.clone()
    }
}

/// Build the dashboard router
pub fn router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET]);

    Router::new()
        .route("/", get(pages::dashboard_handler))
        .route("/api/stocks", get(api::stocks_handler))
        .route("/health", get(api::health_handler))
        .layer(cors)
        .with_state(app_state)
}

/// Start the axum server
pub async fn serve(
    quotes: SharedQuoteStore,
    health_stats: SharedHealthStats,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app_state = AppState {
        quotes,
        health_stats,
    };

    tracing::info!("Registering routes:");
    tracing::info!("  GET /            (dashboard page)");
    tracing::info!("  GET /api/stocks  (latest quotes as JSON)");
    tracing::info!("  GET /health      (worker health stats)");

    let app = router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
