use serde::{Deserialize, Serialize};

use crate::utils::format_price;

/// A single dashboard quote, shaped exactly as `/api/stocks` serves it.
///
/// Price fields are pre-formatted two-decimal strings; the page parses them
/// back to floats when it rebuilds the card grid. `timestamp` is epoch
/// milliseconds of the last successful fetch for this symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockQuote {
    pub symbol: String,
    pub company_name: String,
    pub logo: String,
    pub current_price: String,
    pub high_price: String,
    pub low_price: String,
    pub open_price: String,
    pub prev_close_price: String,
    pub change: String,
    pub percentage_change: String,
    pub timestamp: i64,
}

impl StockQuote {
    /// Build a quote from raw Finnhub prices.
    ///
    /// `change = current - prev_close`; the percentage change guards against
    /// a zero previous close (new listings, halted symbols) by reporting 0.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: String,
        company_name: String,
        logo: String,
        current: f64,
        open: f64,
        high: f64,
        low: f64,
        prev_close: f64,
        timestamp: i64,
    ) -> Self {
        let change = current - prev_close;
        let percentage_change = if prev_close != 0.0 {
            change / prev_close * 100.0
        } else {
            0.0
        };

        Self {
            symbol,
            company_name,
            logo,
            current_price: format_price(current),
            high_price: format_price(high),
            low_price: format_price(low),
            open_price: format_price(open),
            prev_close_price: format_price(prev_close),
            change: format_price(change),
            percentage_change: format_price(percentage_change),
            timestamp,
        }
    }

    /// Numeric change, parsed back from the display string
    pub fn change_value(&self) -> f64 {
        self.change.parse().unwrap_or(0.0)
    }

    /// Polarity for the card: zero change counts as positive
    pub fn is_positive(&self) -> bool {
        self.change_value() >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(current: f64, prev_close: f64) -> StockQuote {
        StockQuote::new(
            "AAPL".to_string(),
            "Apple Inc".to_string(),
            String::new(),
            current,
            100.0,
            110.0,
            95.0,
            prev_close,
            1_700_000_000_000,
        )
    }

    #[test]
    fn test_change_and_percentage() {
        let q = quote(105.0, 100.0);
        assert_eq!(q.change, "5.00");
        assert_eq!(q.percentage_change, "5.00");

        let q = quote(95.0, 100.0);
        assert_eq!(q.change, "-5.00");
        assert_eq!(q.percentage_change, "-5.00");
    }

    #[test]
    fn test_percentage_zero_prev_close_guard() {
        let q = quote(42.0, 0.0);
        assert_eq!(q.change, "42.00");
        assert_eq!(q.percentage_change, "0.00");
    }

    #[test]
    fn test_zero_change_counts_as_positive() {
        let q = quote(100.0, 100.0);
        assert_eq!(q.change, "0.00");
        assert!(q.is_positive());

        let q = quote(99.99, 100.0);
        assert!(!q.is_positive());
    }

    #[test]
    fn test_prices_render_with_two_decimals() {
        let q = StockQuote::new(
            "IBM".to_string(),
            "IBM".to_string(),
            String::new(),
            101.0,
            101.0,
            101.0,
            101.0,
            101.0,
            0,
        );
        assert_eq!(q.current_price, "101.00");
        assert_eq!(q.open_price, "101.00");
        assert_eq!(q.high_price, "101.00");
        assert_eq!(q.low_price, "101.00");
        assert_eq!(q.prev_close_price, "101.00");
    }

    #[test]
    fn test_serialized_shape() {
        let q = quote(105.5, 100.0);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["current_price"], "105.50");
        assert_eq!(json["percentage_change"], "5.50");
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }
}
