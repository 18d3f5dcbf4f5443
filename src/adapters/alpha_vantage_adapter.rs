//! Alpha Vantage daily time series adapter.
//!
//! One blocking GET per fetch, no retries. Closes are ordered by date key,
//! oldest first.

use crate::domain::error::MacrossError;
use crate::domain::price::PriceSeries;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};

const BASE_URL: &str = "https://www.alphavantage.co/query";
const SERIES_KEY: &str = "Time Series (Daily)";
const CLOSE_KEY: &str = "4. close";

pub struct AlphaVantageAdapter {
    api_key: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl AlphaVantageAdapter {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }

    fn query(&self, symbol: &str) -> [(&'static str, String); 4] {
        [
            ("function", "TIME_SERIES_DAILY".to_string()),
            ("symbol", symbol.to_string()),
            ("apikey", self.api_key.clone()),
            ("outputsize", "full".to_string()),
        ]
    }
}

impl PricePort for AlphaVantageAdapter {
    fn fetch_closes(&self, symbol: &str) -> Result<PriceSeries, MacrossError> {
        info!(symbol, "fetching daily prices from Alpha Vantage");

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query(symbol))
            .send()
            .map_err(|e| MacrossError::unavailable(symbol, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MacrossError::unavailable(
                symbol,
                format!("HTTP status {}", status),
            ));
        }

        let body = response
            .text()
            .map_err(|e| MacrossError::unavailable(symbol, format!("failed to read body: {}", e)))?;

        parse_daily_closes(symbol, &body)
    }
}

/// Extracts `"4. close"` from every entry of `"Time Series (Daily)"`.
pub fn parse_daily_closes(symbol: &str, body: &str) -> Result<PriceSeries, MacrossError> {
    let data: Value = serde_json::from_str(body)
        .map_err(|e| MacrossError::unavailable(symbol, format!("invalid JSON: {}", e)))?;

    let Some(series) = data.get(SERIES_KEY).and_then(Value::as_object) else {
        let reason = data
            .get("Error Message")
            .or_else(|| data.get("Note"))
            .or_else(|| data.get("Information"))
            .and_then(Value::as_str)
            .unwrap_or("response has no daily time series");
        return Err(MacrossError::unavailable(symbol, reason));
    };

    let mut rows = Vec::with_capacity(series.len());
    for (key, entry) in series {
        let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").map_err(|e| {
            MacrossError::unavailable(symbol, format!("invalid date key {:?}: {}", key, e))
        })?;
        let close = entry
            .get(CLOSE_KEY)
            .and_then(close_value)
            .ok_or_else(|| {
                MacrossError::unavailable(symbol, format!("missing close for {}", key))
            })?;
        rows.push((date, close));
    }

    if rows.is_empty() {
        return Err(MacrossError::unavailable(symbol, "daily time series is empty"));
    }

    rows.sort_by_key(|(date, _)| *date);
    debug!(symbol, rows = rows.len(), "parsed daily closes");

    PriceSeries::new(rows.into_iter().map(|(_, close)| close).collect())
}

// Alpha Vantage sends prices as strings.
fn close_value(v: &Value) -> Option<f64> {
    match v {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
