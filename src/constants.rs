//! Dashboard Constants
//!
//! Polling cadences, the default symbol universe, and Finnhub endpoints.

/// Finnhub REST API base URL
pub const FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";

/// Environment variable holding the Finnhub API key (required)
pub const FINNHUB_API_KEY_ENV: &str = "FINNHUB_API_KEY";

/// Environment variable overriding the worker fetch interval (seconds)
pub const FETCH_INTERVAL_ENV: &str = "FETCH_INTERVAL_SECS";

/// Environment variable overriding the symbol list (comma-separated)
pub const STOCK_SYMBOLS_ENV: &str = "STOCK_SYMBOLS";

/// Default port for the dashboard server
pub const DEFAULT_PORT: u16 = 5000;

/// How often the background worker refreshes the whole symbol list
pub const DEFAULT_FETCH_INTERVAL_SECS: u64 = 30;

/// Courtesy delay between per-symbol Finnhub requests within one cycle.
/// Finnhub's free tier allows 60 calls/minute; each symbol costs two calls
/// (quote + profile), so pacing keeps a full sweep under the limit.
pub const SYMBOL_FETCH_DELAY_MS: u64 = 500;

/// How often the dashboard page re-polls `/api/stocks` (milliseconds)
pub const PAGE_POLL_INTERVAL_MS: u64 = 10_000;

/// How often the dashboard clock re-renders (milliseconds)
pub const CLOCK_INTERVAL_MS: u64 = 1_000;

/// Default symbols shown on the dashboard when `STOCK_SYMBOLS` is unset
pub const DEFAULT_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "GOOG", "AMZN", "NVDA", "TSLA", "IBM", "META", "JPM", "KO",
    "PG", "UNH", "VOO", "SPY", "INTC", "PEP", "V", "MA", "DIS", "NFLX", "ADBE",
    "CRM", "ORCL", "CSCO", "BA", "WMT", "CVX", "XOM", "BAC", "T", "NKE", "MCD",
    "HD", "PFE", "MRK", "ABT", "TMO", "LLY", "COST", "AVGO", "GE", "DHR", "BMY",
    "CAT", "QCOM", "AMAT", "AMD", "FDX", "UPS", "GILD", "AXP", "DE", "BKNG",
    "ZTS",
];

/// Resolve the dashboard symbol list from the environment or the default set
pub fn dashboard_symbols() -> Vec<String> {
    std::env::var(STOCK_SYMBOLS_ENV)
        .ok()
        .map(|raw| {
            raw.split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect::<Vec<String>>()
        })
        .filter(|symbols| !symbols.is_empty())
        .unwrap_or_else(|| DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect())
}

/// Resolve the worker fetch interval from the environment or the default
pub fn fetch_interval_secs() -> u64 {
    std::env::var(FETCH_INTERVAL_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|&secs| secs > 0)
        .unwrap_or(DEFAULT_FETCH_INTERVAL_SECS)
}
