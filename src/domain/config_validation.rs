//! Crossover period validation.
//!
//! Runs before any price data is fetched.

use crate::domain::error::MacrossError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverParams {
    pub short_period: usize,
    pub long_period: usize,
}

impl CrossoverParams {
    /// Both periods positive and `short < long`.
    pub fn validate(short_period: i64, long_period: i64) -> Result<Self, MacrossError> {
        if short_period <= 0 {
            return Err(invalid(format!(
                "short period must be positive, got {short_period}"
            )));
        }
        if long_period <= 0 {
            return Err(invalid(format!(
                "long period must be positive, got {long_period}"
            )));
        }
        if short_period >= long_period {
            return Err(invalid(format!(
                "short period ({short_period}) must be less than long period ({long_period})"
            )));
        }
        Ok(CrossoverParams {
            short_period: short_period as usize,
            long_period: long_period as usize,
        })
    }
}

fn invalid(reason: String) -> MacrossError {
    MacrossError::InvalidConfiguration { reason }
}
