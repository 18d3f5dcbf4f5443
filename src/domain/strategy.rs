//! Moving-average crossover pipeline: prices -> two averages -> signals -> value.

use tracing::{debug, info};

use crate::domain::backtest::{self, BacktestResult};
use crate::domain::config_validation::CrossoverParams;
use crate::domain::error::MacrossError;
use crate::domain::moving_average;
use crate::domain::price::PriceSeries;
use crate::domain::signal::{self, Signal};

/// One line of the per-period timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub index: usize,
    pub price: f64,
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
    pub signal: Signal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyRun {
    pub params: CrossoverParams,
    pub rows: Vec<ReportRow>,
    pub backtest: BacktestResult,
}

impl StrategyRun {
    pub fn final_value(&self) -> f64 {
        self.backtest.final_value
    }

    pub fn signals(&self) -> impl Iterator<Item = Signal> + '_ {
        self.rows.iter().map(|r| r.signal)
    }
}

pub fn evaluate(
    symbol: &str,
    prices: &PriceSeries,
    params: &CrossoverParams,
) -> Result<StrategyRun, MacrossError> {
    if prices.is_empty() {
        return Err(MacrossError::unavailable(symbol, "price series is empty"));
    }

    let closes = prices.as_slice();
    let short = moving_average::compute(closes, params.short_period);
    let long = moving_average::compute(closes, params.long_period);
    debug!(
        short_defined = short.defined_count(),
        long_defined = long.defined_count(),
        "moving averages ready"
    );

    let signals = signal::generate(&short, &long)?;
    let backtest = backtest::replay(closes, &signals)?;
    info!(
        symbol,
        bars = closes.len(),
        trades = backtest.fills.len(),
        final_value = backtest.final_value,
        "backtest complete"
    );

    let rows = closes
        .iter()
        .zip(&signals)
        .enumerate()
        .map(|(index, (&price, &signal))| ReportRow {
            index,
            price,
            short_ma: short.get(index),
            long_ma: long.get(index),
            signal,
        })
        .collect();

    Ok(StrategyRun {
        params: *params,
        rows,
        backtest,
    })
}
