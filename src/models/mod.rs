mod quote;

pub use quote::StockQuote;

use std::collections::BTreeMap;

/// Quote map keyed by symbol, iteration order lexicographic ascending
pub type QuoteMap = BTreeMap<String, StockQuote>;
