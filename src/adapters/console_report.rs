//! Plain-text timeline report.

use std::cell::RefCell;
use std::io::{self, Stdout, Write};

use crate::domain::error::MacrossError;
use crate::domain::strategy::StrategyRun;
use crate::ports::report_port::ReportPort;

const NOT_AVAILABLE: &str = "N/A";

/// Renders into memory on `stage`; the sink (stdout by default) only sees
/// the text on `commit`.
pub struct ConsoleReport<W: Write = Stdout> {
    sink: RefCell<W>,
    staged: RefCell<Option<Vec<u8>>>,
}

impl ConsoleReport<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for ConsoleReport<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleReport<W> {
    pub fn with_writer(sink: W) -> Self {
        Self {
            sink: RefCell::new(sink),
            staged: RefCell::new(None),
        }
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}

impl<W: Write> ReportPort for ConsoleReport<W> {
    fn stage(&self, run: &StrategyRun, symbol: &str) -> Result<(), MacrossError> {
        let mut buf = Vec::new();
        render(run, symbol, &mut buf)?;
        *self.staged.borrow_mut() = Some(buf);
        Ok(())
    }

    fn commit(&self) -> Result<(), MacrossError> {
        let Some(buf) = self.staged.borrow_mut().take() else {
            return Ok(());
        };
        let mut sink = self.sink.borrow_mut();
        sink.write_all(&buf)?;
        sink.flush()?;
        Ok(())
    }

    fn discard(&self) {
        self.staged.borrow_mut().take();
    }
}

pub fn render<W: Write>(run: &StrategyRun, symbol: &str, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{}: SMA({}) / SMA({}) crossover",
        symbol, run.params.short_period, run.params.long_period
    )?;
    for row in &run.rows {
        writeln!(
            out,
            "price: {}, short ma: {}, long ma: {}, signal: {}",
            row.price,
            format_ma(row.short_ma),
            format_ma(row.long_ma),
            row.signal
        )?;
    }
    writeln!(
        out,
        "trades: {}, total return: {:.2}%",
        run.backtest.fills.len(),
        run.backtest.total_return() * 100.0
    )?;
    writeln!(out, "final portfolio value: ${:.2}", run.final_value())
}

fn format_ma(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => NOT_AVAILABLE.to_string(),
    }
}
