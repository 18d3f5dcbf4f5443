#![allow(dead_code)]

use macross::domain::error::MacrossError;
use macross::domain::price::PriceSeries;
use macross::domain::strategy::StrategyRun;
use macross::ports::price_port::PricePort;
use macross::ports::report_port::ReportPort;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub struct MockPricePort {
    pub data: HashMap<String, Vec<f64>>,
    pub errors: HashMap<String, String>,
    pub calls: Cell<usize>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: Cell::new(0),
        }
    }

    pub fn with_prices(mut self, symbol: &str, prices: &[f64]) -> Self {
        self.data.insert(symbol.to_string(), prices.to_vec());
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl PricePort for MockPricePort {
    fn fetch_closes(&self, symbol: &str) -> Result<PriceSeries, MacrossError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(reason) = self.errors.get(symbol) {
            return Err(MacrossError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        PriceSeries::new(self.data.get(symbol).cloned().unwrap_or_default())
    }
}

/// Captures every report it is asked to publish.
pub struct RecordingReport {
    pub staged: RefCell<Option<(String, f64, usize)>>,
    pub written: RefCell<Vec<(String, f64, usize)>>,
    pub discarded: Cell<usize>,
}

impl RecordingReport {
    pub fn new() -> Self {
        Self {
            staged: RefCell::new(None),
            written: RefCell::new(Vec::new()),
            discarded: Cell::new(0),
        }
    }
}

impl ReportPort for RecordingReport {
    fn stage(&self, run: &StrategyRun, symbol: &str) -> Result<(), MacrossError> {
        *self.staged.borrow_mut() = Some((symbol.to_string(), run.final_value(), run.rows.len()));
        Ok(())
    }

    fn commit(&self) -> Result<(), MacrossError> {
        if let Some(entry) = self.staged.borrow_mut().take() {
            self.written.borrow_mut().push(entry);
        }
        Ok(())
    }

    fn discard(&self) {
        self.staged.borrow_mut().take();
        self.discarded.set(self.discarded.get() + 1);
    }
}

/// The six-bar fixture: [10, 10, 10, 12, 8, 8].
pub const FIXTURE: [f64; 6] = [10.0, 10.0, 10.0, 12.0, 8.0, 8.0];

pub fn rising(count: usize, start: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| start + i as f64 * step).collect()
}
