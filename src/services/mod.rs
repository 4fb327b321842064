pub mod finnhub;
pub mod quote_store;

pub use finnhub::FinnhubClient;
pub use quote_store::{HealthStats, QuoteStore, SharedHealthStats, SharedQuoteStore};
