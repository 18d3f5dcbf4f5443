//! Report output port trait.

use crate::domain::error::MacrossError;
use crate::domain::strategy::StrategyRun;

/// Port for writing the signal timeline and final portfolio value.
///
/// Reports are produced in two steps so that a run with several reports
/// shows either all of them or none: `stage` renders without making output
/// visible, `commit` publishes what was staged.
pub trait ReportPort {
    fn stage(&self, run: &StrategyRun, symbol: &str) -> Result<(), MacrossError>;

    fn commit(&self) -> Result<(), MacrossError>;

    /// Drops staged output. Called when another report failed to stage.
    fn discard(&self) {}
}
