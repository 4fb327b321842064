use chrono::Utc;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::constants::{fetch_interval_secs, SYMBOL_FETCH_DELAY_MS};
use crate::services::{FinnhubClient, SharedHealthStats, SharedQuoteStore};

/// Background quote refresher.
///
/// Sweeps the configured symbol list sequentially every fetch interval,
/// replacing stored quotes one symbol at a time. Symbols are never fetched
/// concurrently, so a slow response cannot overwrite a newer one.
pub async fn run(
    client: FinnhubClient,
    store: SharedQuoteStore,
    health_stats: SharedHealthStats,
    symbols: Vec<String>,
) {
    let interval = Duration::from_secs(fetch_interval_secs());

    info!(
        symbols = symbols.len(),
        interval_secs = interval.as_secs(),
        "Starting quote worker"
    );

    let mut iteration_count = 0u64;

    loop {
        iteration_count += 1;
        let cycle_start = Instant::now();

        let updated = poll_cycle(&client, &store, &symbols).await;

        // Update health stats after every cycle
        {
            let mut health = health_stats.write().await;
            health.last_sync = Some(Utc::now().to_rfc3339());
            health.iteration_count = iteration_count;
            health.symbols_tracked = symbols.len();
            health.quotes_count = store.len().await;
        }

        let cycle_duration = cycle_start.elapsed();
        info!(
            iteration = iteration_count,
            updated,
            total = symbols.len(),
            cycle_secs = cycle_duration.as_secs_f64(),
            "Quote worker: Cycle completed"
        );

        // Sleep only for the remainder of the interval
        if let Some(remaining) = interval.checked_sub(cycle_duration) {
            sleep(remaining).await;
        }
    }
}

/// One full sweep over the symbol list. Returns how many quotes were stored.
///
/// Failures are per-symbol: a network or parse error is logged and the sweep
/// moves on, keeping whatever the store already holds for that symbol.
pub async fn poll_cycle(
    client: &FinnhubClient,
    store: &SharedQuoteStore,
    symbols: &[String],
) -> usize {
    let mut updated = 0;

    for symbol in symbols {
        match client.fetch_quote(symbol).await {
            Ok(Some(quote)) => {
                info!(symbol = %quote.symbol, company = %quote.company_name, "Updated dashboard quote");
                store.insert(quote).await;
                updated += 1;
            }
            Ok(None) => {
                warn!(symbol = %symbol, "No quote data available");
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Failed to fetch quote");
            }
        }

        // Pace requests to stay inside the Finnhub free-tier rate limit
        sleep(Duration::from_millis(SYMBOL_FETCH_DELAY_MS)).await;
    }

    updated
}
