//! Simple moving average over closing prices.
//!
//! SMA(n)[i] = (P[i] + P[i-1] + ... + P[i-n+1]) / n
//! Warmup: first (n-1) entries are undefined.
//!
//! Each window is re-summed from its newest price back to its oldest, so the
//! output does not depend on any running-sum state.

use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverageSeries {
    pub period: usize,
    pub values: Vec<Option<f64>>,
}

impl MovingAverageSeries {
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Trailing simple moving average. A zero period, or one longer than the
/// series, yields an all-undefined result of the same length as `prices`.
pub fn compute(prices: &[f64], period: usize) -> MovingAverageSeries {
    let values = (0..prices.len())
        .map(|i| {
            if period == 0 || i + 1 < period {
                return None;
            }
            let sum = prices[i + 1 - period..=i]
                .iter()
                .rev()
                .fold(0.0, |acc, p| acc + p);
            Some(sum / period as f64)
        })
        .collect::<Vec<_>>();

    trace!(period, len = values.len(), "computed moving average");

    MovingAverageSeries { period, values }
}
