use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::constants::{FINNHUB_API_KEY_ENV, FINNHUB_BASE_URL};
use crate::error::{AppError, Result};
use crate::models::StockQuote;
use crate::utils::now_millis;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Raw `/quote` response. Finnhub uses one-letter field names; every field
/// is optional because unknown symbols come back as an empty object.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteResponse {
    /// Current price
    pub c: Option<f64>,
    /// High price of the day
    pub h: Option<f64>,
    /// Low price of the day
    pub l: Option<f64>,
    /// Open price of the day
    pub o: Option<f64>,
    /// Previous close price
    pub pc: Option<f64>,
    /// Quote timestamp (epoch seconds)
    pub t: Option<i64>,
}

/// Raw `/stock/profile2` response, reduced to the fields the dashboard shows
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub logo: Option<String>,
}

/// Thin Finnhub REST client for the dashboard data the page needs
pub struct FinnhubClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl FinnhubClient {
    pub fn new(api_key: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: FINNHUB_BASE_URL.to_string(),
        })
    }

    /// Client pointed at an alternate base URL, for local stub servers
    #[cfg(test)]
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let mut client = Self::new(api_key)?;
        client.base_url = base_url;
        Ok(client)
    }

    /// Build a client from the `FINNHUB_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(FINNHUB_API_KEY_ENV)
            .map_err(|_| AppError::Config(format!("{} is not set", FINNHUB_API_KEY_ENV)))?;
        Self::new(api_key)
    }

    /// GET `/quote` for a symbol
    pub async fn quote(&self, symbol: &str) -> Result<QuoteResponse> {
        let url = format!(
            "{}/quote?symbol={}&token={}",
            self.base_url, symbol, self.api_key
        );
        self.get_json(&url, symbol).await
    }

    /// GET `/stock/profile2` for a symbol
    pub async fn company_profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let url = format!(
            "{}/stock/profile2?symbol={}&token={}",
            self.base_url, symbol, self.api_key
        );
        self.get_json(&url, symbol).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str, symbol: &str) -> Result<T> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Network(format!(
                "Finnhub returned HTTP {} for {}",
                status, symbol
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(Into::into)
    }

    /// Fetch quote and profile for one symbol and combine them into a
    /// dashboard `StockQuote`.
    ///
    /// Returns `Ok(None)` when Finnhub has no current price for the symbol;
    /// the caller keeps whatever data it already holds.
    pub async fn fetch_quote(&self, symbol: &str) -> Result<Option<StockQuote>> {
        let quote = self.quote(symbol).await?;

        let current = match quote.c {
            Some(c) => c,
            None => {
                debug!(symbol, "No valid quote data, skipping");
                return Ok(None);
            }
        };

        let profile = self.company_profile(symbol).await?;
        let company_name = profile
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| symbol.to_string());
        let logo = profile.logo.unwrap_or_default();

        Ok(Some(StockQuote::new(
            symbol.to_string(),
            company_name,
            logo,
            current,
            quote.o.unwrap_or(0.0),
            quote.h.unwrap_or(0.0),
            quote.l.unwrap_or(0.0),
            quote.pc.unwrap_or(0.0),
            now_millis(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FinnhubClient::new("demo-key".to_string());
        assert!(client.is_ok());
    }

    #[test]
    fn test_quote_response_parsing() {
        let json = r#"{"c":261.74,"h":263.31,"l":260.68,"o":261.07,"pc":259.45,"t":1582641000}"#;
        let quote: QuoteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(quote.c, Some(261.74));
        assert_eq!(quote.pc, Some(259.45));
        assert_eq!(quote.t, Some(1582641000));
    }

    #[test]
    fn test_empty_quote_response() {
        // Finnhub answers unknown symbols with an empty object
        let quote: QuoteResponse = serde_json::from_str("{}").unwrap();
        assert!(quote.c.is_none());
    }

    #[test]
    fn test_profile_parsing_ignores_extra_fields() {
        let json = r#"{"name":"Apple Inc","logo":"https://example.com/aapl.png","ticker":"AAPL","weburl":"https://www.apple.com/"}"#;
        let profile: CompanyProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Apple Inc"));
        assert_eq!(profile.logo.as_deref(), Some("https://example.com/aapl.png"));
    }
}
