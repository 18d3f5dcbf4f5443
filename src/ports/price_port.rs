//! Historical price source port.

use crate::domain::error::MacrossError;
use crate::domain::price::PriceSeries;

pub trait PricePort {
    /// Daily closing prices for `symbol`, oldest first.
    fn fetch_closes(&self, symbol: &str) -> Result<PriceSeries, MacrossError>;
}
