//! CSV export of the signal timeline.
//!
//! Rows are staged into `<path>.partial` and renamed onto `path` on commit.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::domain::error::MacrossError;
use crate::domain::strategy::StrategyRun;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Serialize)]
struct RowRecord {
    index: usize,
    price: f64,
    short_ma: Option<f64>,
    long_ma: Option<f64>,
    signal: &'static str,
}

pub struct CsvReport {
    path: PathBuf,
}

impl CsvReport {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn partial_path(&self) -> PathBuf {
        let mut p = self.path.clone().into_os_string();
        p.push(".partial");
        PathBuf::from(p)
    }
}

impl ReportPort for CsvReport {
    fn stage(&self, run: &StrategyRun, symbol: &str) -> Result<(), MacrossError> {
        let partial = self.partial_path();
        let mut wtr = csv::Writer::from_path(&partial).map_err(csv_error)?;
        for row in &run.rows {
            wtr.serialize(RowRecord {
                index: row.index,
                price: row.price,
                short_ma: row.short_ma,
                long_ma: row.long_ma,
                signal: row.signal.label(),
            })
            .map_err(csv_error)?;
        }
        wtr.flush()?;
        info!(symbol, path = %partial.display(), rows = run.rows.len(), "CSV report staged");
        Ok(())
    }

    fn commit(&self) -> Result<(), MacrossError> {
        let partial = self.partial_path();
        if !partial.exists() {
            return Ok(());
        }
        fs::rename(&partial, &self.path)?;
        info!(path = %self.path.display(), "CSV report written");
        Ok(())
    }

    fn discard(&self) {
        let _ = fs::remove_file(self.partial_path());
    }
}

fn csv_error(e: csv::Error) -> MacrossError {
    MacrossError::Io(std::io::Error::other(e))
}
