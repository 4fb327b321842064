use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{QuoteMap, StockQuote};

/// In-memory store of the latest quote per symbol.
///
/// The background worker writes, the API handlers read. Quotes are never
/// diffed or merged: each successful fetch replaces the previous entry
/// wholesale.
pub struct QuoteStore {
    quotes: RwLock<HashMap<String, StockQuote>>,
}

// Shared store for passing between the worker and the server
pub type SharedQuoteStore = Arc<QuoteStore>;

impl QuoteStore {
    pub fn new() -> Self {
        Self {
            quotes: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace the quote for a symbol
    pub async fn insert(&self, quote: StockQuote) {
        let mut quotes = self.quotes.write().await;
        quotes.insert(quote.symbol.clone(), quote);
    }

    /// Snapshot of all quotes, keyed and ordered by symbol.
    ///
    /// The `BTreeMap` keeps the `/api/stocks` key set in lexicographic
    /// order, which is also the card order the page renders.
    pub async fn snapshot(&self) -> QuoteMap {
        let quotes = self.quotes.read().await;
        quotes
            .iter()
            .map(|(symbol, quote)| (symbol.clone(), quote.clone()))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.quotes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.quotes.read().await.is_empty()
    }
}

impl Default for QuoteStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Health statistics served at `/health`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthStats {
    pub last_sync: Option<String>,
    pub iteration_count: u64,
    pub symbols_tracked: usize,
    pub quotes_count: usize,
    pub uptime_secs: u64,
    pub current_system_time: String,
}

impl Default for HealthStats {
    fn default() -> Self {
        Self {
            last_sync: None,
            iteration_count: 0,
            symbols_tracked: 0,
            quotes_count: 0,
            uptime_secs: 0,
            current_system_time: Utc::now().to_rfc3339(),
        }
    }
}

pub type SharedHealthStats = Arc<RwLock<HealthStats>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str) -> StockQuote {
        StockQuote::new(
            symbol.to_string(),
            format!("{} Inc", symbol),
            String::new(),
            100.0,
            99.0,
            101.0,
            98.0,
            99.5,
            0,
        )
    }

    #[tokio::test]
    async fn test_snapshot_is_sorted() {
        let store = QuoteStore::new();
        for symbol in ["TSLA", "AAPL", "MSFT", "IBM"] {
            store.insert(quote(symbol)).await;
        }

        let snapshot = store.snapshot().await;
        let symbols: Vec<&String> = snapshot.keys().collect();
        assert_eq!(symbols, ["AAPL", "IBM", "MSFT", "TSLA"]);
    }

    #[tokio::test]
    async fn test_insert_replaces_existing() {
        let store = QuoteStore::new();
        store.insert(quote("AAPL")).await;

        let mut updated = quote("AAPL");
        updated.current_price = "200.00".to_string();
        store.insert(updated).await;

        assert_eq!(store.len().await, 1);
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot["AAPL"].current_price, "200.00");
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = QuoteStore::new();
        assert!(store.is_empty().await);
        assert!(store.snapshot().await.is_empty());
    }
}
