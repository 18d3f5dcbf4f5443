//! Closing price series, oldest first.
//!
//! Zero closes are accepted. Buying at 0 and selling at 0 yields a NaN
//! portfolio value (inf * 0), which is passed through unchanged.

use crate::domain::error::MacrossError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Every close must be finite and non-negative.
    pub fn new(closes: Vec<f64>) -> Result<Self, MacrossError> {
        if let Some((index, &value)) = closes
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(MacrossError::InvalidPrice { index, value });
        }
        Ok(Self { closes })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn last(&self) -> Option<f64> {
        self.closes.last().copied()
    }
}
