//! NSE wire models.
//!
//! Field names are mapped from the NSE historical API via serde renames.
//! Prices arrive as optional values: the feed serves nulls for suspended
//! sessions, and those rows are dropped by [`filter_valid`] before any
//! volatility math runs.

use serde::Deserialize;

/// Response shape of the `equity-stockIndices` endpoint (F&O universe).
#[derive(Debug, Deserialize)]
pub struct FoIndexResponse {
    #[serde(default)]
    pub data: Vec<FoIndexRow>,
}

#[derive(Debug, Deserialize)]
pub struct FoIndexRow {
    pub symbol: String,
}

/// Response shape of the `historical/cm/equity` endpoint.
#[derive(Debug, Deserialize)]
pub struct EquityHistoryResponse {
    #[serde(default)]
    pub data: Vec<PriceRecord>,
}

/// One trading day of raw history for a symbol.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "CH_CLOSING_PRICE")]
    pub close: Option<f64>,
    #[serde(rename = "CH_PREVIOUS_CLS_PRICE")]
    pub prev_close: Option<f64>,
    #[serde(rename = "CH_TRADE_HIGH_PRICE")]
    pub high: Option<f64>,
    #[serde(rename = "CH_TRADE_LOW_PRICE")]
    pub low: Option<f64>,
    #[serde(rename = "CH_TIMESTAMP")]
    pub trade_date: Option<String>,
}

/// A record that survived cleaning. `prev_close` is guaranteed positive,
/// so it is always safe as a divisor.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecord {
    pub trade_date: String,
    pub close: f64,
    pub prev_close: f64,
    pub high: f64,
    pub low: f64,
}

/// Drops records with any missing field or a non-positive previous close.
///
/// Exclusion happens exactly once per record; the daily and intraday series
/// are then computed from the same surviving set.
pub fn filter_valid(records: &[PriceRecord]) -> Vec<ValidRecord> {
    records
        .iter()
        .filter_map(|r| {
            let (close, prev_close, high, low, trade_date) = (
                r.close?,
                r.prev_close?,
                r.high?,
                r.low?,
                r.trade_date.clone()?,
            );
            if prev_close > 0.0 {
                Some(ValidRecord {
                    trade_date,
                    close,
                    prev_close,
                    high,
                    low,
                })
            } else {
                None
            }
        })
        .collect()
}
