//! Remote market-data capabilities and their NSE implementation.
//!
//! The pipeline only depends on the two traits; the test suite swaps in
//! in-memory doubles instead of touching the network.

use async_trait::async_trait;
use chrono::Local;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, ScanError};
use crate::models::{EquityHistoryResponse, FoIndexResponse, PriceRecord};

const NSE_BASE_URL: &str = "https://www.nseindia.com";
const FO_INDEX: &str = "SECURITIES IN F&O";

/// Provides the set of derivative-eligible tickers.
#[async_trait]
pub trait SymbolSource {
    async fn fetch_fo_symbols(&self) -> Result<Vec<String>>;
}

/// Provides daily OHLC history for one symbol over a trailing window.
#[async_trait]
pub trait HistoryFetcher {
    async fn fetch_price_history(
        &self,
        symbol: &str,
        lookback_days: i64,
    ) -> Result<Vec<PriceRecord>>;
}

/// HTTP client for the NSE public API.
///
/// The API rejects bare clients: it wants browser-like headers and a
/// session cookie handed out on the landing page, so construction primes
/// the cookie jar with one request against the site root.
pub struct NseClient {
    http: reqwest::Client,
    base_url: String,
}

impl NseClient {
    pub async fn connect(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
            ),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| ScanError::SourceUnavailable(format!("http client: {e}")))?;

        let client = Self {
            http,
            base_url: NSE_BASE_URL.to_string(),
        };
        client.prime_session().await?;
        Ok(client)
    }

    /// Hits the landing page once so the cookie jar carries a session.
    async fn prime_session(&self) -> Result<()> {
        self.http
            .get(&self.base_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScanError::SourceUnavailable(format!("session priming: {e}")))?;
        debug!("NSE session primed");
        Ok(())
    }
}

#[async_trait]
impl SymbolSource for NseClient {
    async fn fetch_fo_symbols(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/equity-stockIndices", self.base_url);
        let body: FoIndexResponse = self
            .http
            .get(&url)
            .query(&[("index", FO_INDEX)])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScanError::SourceUnavailable(e.to_string()))?
            .json()
            .await
            .map_err(|e| ScanError::SourceUnavailable(format!("malformed symbol payload: {e}")))?;

        // The first data row is the index aggregate, not a ticker.
        let mut symbols: Vec<String> = body
            .data
            .into_iter()
            .map(|row| row.symbol)
            .filter(|s| s != FO_INDEX)
            .collect();
        symbols.sort();
        symbols.dedup();

        if symbols.is_empty() {
            return Err(ScanError::SourceUnavailable(
                "symbol list endpoint returned no tickers".to_string(),
            ));
        }
        Ok(symbols)
    }
}

#[async_trait]
impl HistoryFetcher for NseClient {
    async fn fetch_price_history(
        &self,
        symbol: &str,
        lookback_days: i64,
    ) -> Result<Vec<PriceRecord>> {
        let to = Local::now().date_naive();
        let from = to - chrono::Duration::days(lookback_days);
        // The historical endpoint speaks DD-MM-YYYY regardless of locale.
        let from_s = from.format("%d-%m-%Y").to_string();
        let to_s = to.format("%d-%m-%Y").to_string();

        let url = format!("{}/api/historical/cm/equity", self.base_url);
        let fetch_err = |reason: String| ScanError::Fetch {
            symbol: symbol.to_string(),
            reason,
        };

        let body: EquityHistoryResponse = self
            .http
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("series", r#"["EQ"]"#),
                ("from", from_s.as_str()),
                ("to", to_s.as_str()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| fetch_err(e.to_string()))?
            .json()
            .await
            .map_err(|e| fetch_err(format!("malformed history payload: {e}")))?;

        debug!(symbol, records = body.data.len(), "history fetched");
        Ok(body.data)
    }
}
