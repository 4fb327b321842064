use axum::extract::State;
use axum::Json;
use chrono::Utc;
use tracing::debug;

use crate::models::QuoteMap;
use crate::services::{HealthStats, SharedHealthStats, SharedQuoteStore};

/// GET /api/stocks - latest quote per symbol, keys sorted ascending.
///
/// The response is the full quote map; the page discards its previous view
/// and rebuilds the card grid from this object on every poll.
pub async fn stocks_handler(State(store): State<SharedQuoteStore>) -> Json<QuoteMap> {
    let snapshot = store.snapshot().await;
    debug!(quotes = snapshot.len(), "Serving stock snapshot");
    Json(snapshot)
}

/// GET /health - worker and store statistics
pub async fn health_handler(State(health_stats): State<SharedHealthStats>) -> Json<HealthStats> {
    let mut stats = health_stats.read().await.clone();
    stats.current_system_time = Utc::now().to_rfc3339();
    Json(stats)
}
