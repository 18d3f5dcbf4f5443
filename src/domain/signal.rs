//! Crossover signal generation from a short and a long moving average.
//!
//! At index i, with both averages defined:
//! - Buy  when short > long and (i == 0 or short[i-1] <= long[i-1])
//! - Sell when short < long and (i == 0 or short[i-1] >= long[i-1])
//! - Hold otherwise
//!
//! An undefined average at i-1 fails both "previously" tests, so the first
//! index where both averages are defined is always Hold (unless it is index 0).

use std::fmt;

use crate::domain::error::MacrossError;
use crate::domain::moving_average::MovingAverageSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    Undefined,
}

impl Signal {
    pub fn label(self) -> &'static str {
        match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
            Signal::Undefined => "N/A",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Relation of the short average to the long average at the previous index.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Previous {
    /// Index 0: no prior comparison, both tests pass.
    Start,
    /// Either average undefined: both tests fail.
    Undefined,
    Defined { short: f64, long: f64 },
}

impl Previous {
    fn at(short: &MovingAverageSeries, long: &MovingAverageSeries, i: usize) -> Self {
        if i == 0 {
            return Previous::Start;
        }
        match (short.get(i - 1), long.get(i - 1)) {
            (Some(s), Some(l)) => Previous::Defined { short: s, long: l },
            _ => Previous::Undefined,
        }
    }

    fn at_or_below(self) -> bool {
        match self {
            Previous::Start => true,
            Previous::Undefined => false,
            Previous::Defined { short, long } => short <= long,
        }
    }

    fn at_or_above(self) -> bool {
        match self {
            Previous::Start => true,
            Previous::Undefined => false,
            Previous::Defined { short, long } => short >= long,
        }
    }
}

pub fn generate(
    short: &MovingAverageSeries,
    long: &MovingAverageSeries,
) -> Result<Vec<Signal>, MacrossError> {
    if short.len() != long.len() {
        return Err(MacrossError::precondition(format!(
            "moving average lengths differ: short has {}, long has {}",
            short.len(),
            long.len()
        )));
    }

    let signals = (0..short.len())
        .map(|i| {
            let (Some(s), Some(l)) = (short.get(i), long.get(i)) else {
                return Signal::Undefined;
            };
            let previous = Previous::at(short, long, i);
            if s > l && previous.at_or_below() {
                Signal::Buy
            } else if s < l && previous.at_or_above() {
                Signal::Sell
            } else {
                Signal::Hold
            }
        })
        .collect();

    Ok(signals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(period: usize, values: &[Option<f64>]) -> MovingAverageSeries {
        MovingAverageSeries {
            period,
            values: values.to_vec(),
        }
    }

    #[test]
    fn labels() {
        assert_eq!(Signal::Buy.to_string(), "buy");
        assert_eq!(Signal::Sell.to_string(), "sell");
        assert_eq!(Signal::Hold.to_string(), "hold");
        assert_eq!(Signal::Undefined.to_string(), "N/A");
    }

    #[test]
    fn undefined_when_either_side_missing() {
        let short = series(1, &[Some(1.0), None, Some(3.0)]);
        let long = series(2, &[None, Some(2.0), Some(1.0)]);
        let signals = generate(&short, &long).unwrap();

        assert_eq!(signals[0], Signal::Undefined);
        assert_eq!(signals[1], Signal::Undefined);
    }

    #[test]
    fn first_defined_index_is_hold() {
        // short clearly above long, but the previous index is undefined
        let short = series(1, &[Some(5.0), Some(9.0)]);
        let long = series(2, &[None, Some(1.0)]);
        let signals = generate(&short, &long).unwrap();

        assert_eq!(signals, vec![Signal::Undefined, Signal::Hold]);
    }

    #[test]
    fn first_defined_below_is_also_hold() {
        let short = series(1, &[Some(5.0), Some(0.5)]);
        let long = series(2, &[None, Some(1.0)]);
        let signals = generate(&short, &long).unwrap();

        assert_eq!(signals[1], Signal::Hold);
    }

    #[test]
    fn index_zero_emits_signal() {
        let short = series(1, &[Some(2.0)]);
        let long = series(1, &[Some(1.0)]);
        assert_eq!(generate(&short, &long).unwrap(), vec![Signal::Buy]);

        let short = series(1, &[Some(1.0)]);
        let long = series(1, &[Some(2.0)]);
        assert_eq!(generate(&short, &long).unwrap(), vec![Signal::Sell]);

        let short = series(1, &[Some(1.0)]);
        let long = series(1, &[Some(1.0)]);
        assert_eq!(generate(&short, &long).unwrap(), vec![Signal::Hold]);
    }

    #[test]
    fn upward_crossing_from_equal_is_buy() {
        let short = series(1, &[None, Some(10.0), Some(11.0)]);
        let long = series(2, &[None, Some(10.0), Some(10.5)]);
        let signals = generate(&short, &long).unwrap();

        assert_eq!(signals, vec![Signal::Undefined, Signal::Hold, Signal::Buy]);
    }

    #[test]
    fn downward_crossing_is_sell() {
        let short = series(1, &[None, Some(12.0), Some(9.0)]);
        let long = series(2, &[None, Some(10.0), Some(10.0)]);
        let signals = generate(&short, &long).unwrap();

        assert_eq!(signals[2], Signal::Sell);
    }

    #[test]
    fn staying_above_is_hold() {
        let short = series(1, &[None, Some(10.0), Some(12.0), Some(13.0)]);
        let long = series(2, &[None, Some(10.0), Some(11.0), Some(11.5)]);
        let signals = generate(&short, &long).unwrap();

        assert_eq!(signals[2], Signal::Buy);
        assert_eq!(signals[3], Signal::Hold);
    }

    #[test]
    fn touching_then_leaving_in_same_direction_fires_again() {
        // short > long, then equal, then above again: previous <= holds at the third step
        let short = series(1, &[None, Some(10.0), Some(12.0), Some(11.0), Some(13.0)]);
        let long = series(2, &[None, Some(10.0), Some(11.0), Some(11.0), Some(12.0)]);
        let signals = generate(&short, &long).unwrap();

        assert_eq!(signals[2], Signal::Buy);
        assert_eq!(signals[3], Signal::Hold);
        assert_eq!(signals[4], Signal::Buy);
    }

    #[test]
    fn length_mismatch_is_precondition_violation() {
        let short = series(1, &[Some(1.0)]);
        let long = series(2, &[None, Some(1.0)]);
        let err = generate(&short, &long).unwrap_err();
        assert!(matches!(err, MacrossError::PreconditionViolation { .. }));
    }

    #[test]
    fn empty_inputs_give_empty_signals() {
        let short = series(1, &[]);
        let long = series(2, &[]);
        assert!(generate(&short, &long).unwrap().is_empty());
    }
}
