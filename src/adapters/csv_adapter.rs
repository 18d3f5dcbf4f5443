//! CSV file price adapter.
//!
//! Reads `<base>/<SYMBOL>.csv`. The header must name a `date` column
//! (YYYY-MM-DD) and a `close` column; other columns are ignored.

use crate::domain::error::MacrossError;
use crate::domain::price::PriceSeries;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CloseRecord {
    date: String,
    close: f64,
}

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

impl PricePort for CsvPriceAdapter {
    fn fetch_closes(&self, symbol: &str) -> Result<PriceSeries, MacrossError> {
        let path = self.csv_path(symbol);
        let file = File::open(&path).map_err(|e| {
            MacrossError::unavailable(symbol, format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
        let mut rows: Vec<(NaiveDate, f64)> = Vec::new();

        for result in rdr.deserialize() {
            let record: CloseRecord = result.map_err(|e| {
                MacrossError::unavailable(symbol, format!("CSV parse error: {}", e))
            })?;
            let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").map_err(|e| {
                MacrossError::unavailable(
                    symbol,
                    format!("invalid date {:?}: {}", record.date, e),
                )
            })?;
            rows.push((date, record.close));
        }

        rows.sort_by_key(|(date, _)| *date);
        debug!(symbol, rows = rows.len(), path = %path.display(), "loaded CSV prices");

        PriceSeries::new(rows.into_iter().map(|(_, close)| close).collect())
    }
}
