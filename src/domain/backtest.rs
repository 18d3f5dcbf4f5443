//! Single-position backtest replaying signals against prices.

use tracing::debug;

use crate::domain::error::MacrossError;
use crate::domain::portfolio::PortfolioState;
use crate::domain::signal::Signal;

/// Cash the portfolio starts with.
pub const STARTING_CAPITAL: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// A signal that actually changed the portfolio.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub index: usize,
    pub side: Side,
    pub price: f64,
    pub shares: f64,
    pub cash_after: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub final_value: f64,
    pub fills: Vec<Fill>,
    /// Shares still held after the last signal were sold at the last price.
    pub liquidated_at_end: bool,
}

impl BacktestResult {
    pub fn total_return(&self) -> f64 {
        (self.final_value - STARTING_CAPITAL) / STARTING_CAPITAL
    }
}

/// Final portfolio value after replaying `signals`.
pub fn run(prices: &[f64], signals: &[Signal]) -> Result<f64, MacrossError> {
    replay(prices, signals).map(|r| r.final_value)
}

pub fn replay(prices: &[f64], signals: &[Signal]) -> Result<BacktestResult, MacrossError> {
    let Some(&last_price) = prices.last() else {
        return Err(MacrossError::precondition("backtest requires at least one price"));
    };
    if prices.len() != signals.len() {
        return Err(MacrossError::precondition(format!(
            "{} prices but {} signals",
            prices.len(),
            signals.len()
        )));
    }

    let mut state = PortfolioState::new(STARTING_CAPITAL);
    let mut fills = Vec::new();

    for (index, (&price, &signal)) in prices.iter().zip(signals).enumerate() {
        match signal {
            Signal::Buy if state.can_buy() => {
                state.buy_all(price);
                debug!(index, price, shares = state.shares, "buy");
                fills.push(Fill {
                    index,
                    side: Side::Buy,
                    price,
                    shares: state.shares,
                    cash_after: state.cash,
                });
            }
            Signal::Sell if state.is_invested() => {
                let shares = state.shares;
                state.sell_all(price);
                debug!(index, price, cash = state.cash, "sell");
                fills.push(Fill {
                    index,
                    side: Side::Sell,
                    price,
                    shares,
                    cash_after: state.cash,
                });
            }
            _ => {}
        }
    }

    let liquidated_at_end = state.is_invested();
    let final_value = state.liquidate(last_price);
    if liquidated_at_end {
        debug!(price = last_price, cash = final_value, "liquidated at last price");
    }

    Ok(BacktestResult {
        final_value,
        fills,
        liquidated_at_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use Signal::*;

    #[test]
    fn empty_prices_is_precondition_violation() {
        let err = run(&[], &[]).unwrap_err();
        assert!(matches!(err, MacrossError::PreconditionViolation { .. }));
    }

    #[test]
    fn length_mismatch_is_precondition_violation() {
        let err = run(&[1.0, 2.0], &[Hold]).unwrap_err();
        assert!(matches!(err, MacrossError::PreconditionViolation { .. }));
    }

    #[test]
    fn no_trades_keeps_starting_capital() {
        let value = run(&[10.0, 11.0, 12.0], &[Undefined, Hold, Hold]).unwrap();
        assert_eq!(value, STARTING_CAPITAL);
    }

    #[test]
    fn buy_then_sell() {
        let result = replay(&[10.0, 20.0, 25.0], &[Buy, Sell, Hold]).unwrap();

        assert_relative_eq!(result.final_value, 20_000.0);
        assert_eq!(result.fills.len(), 2);
        assert_eq!(result.fills[0].side, Side::Buy);
        assert_relative_eq!(result.fills[0].shares, 1_000.0);
        assert_eq!(result.fills[1].side, Side::Sell);
        assert_eq!(result.fills[1].index, 1);
        assert!(!result.liquidated_at_end);
        assert_relative_eq!(result.total_return(), 1.0);
    }

    #[test]
    fn repeated_buy_is_ignored() {
        let result = replay(&[10.0, 5.0, 20.0], &[Buy, Buy, Sell]).unwrap();

        assert_eq!(result.fills.len(), 2);
        assert_relative_eq!(result.final_value, 20_000.0);
    }

    #[test]
    fn sell_without_shares_is_ignored() {
        let result = replay(&[10.0, 20.0], &[Sell, Hold]).unwrap();
        assert!(result.fills.is_empty());
        assert_eq!(result.final_value, STARTING_CAPITAL);
    }

    #[test]
    fn open_position_is_liquidated_at_last_price() {
        let result = replay(&[10.0, 15.0, 8.0], &[Buy, Hold, Undefined]).unwrap();

        assert!(result.liquidated_at_end);
        assert_relative_eq!(result.final_value, 8_000.0);
        assert_eq!(result.fills.len(), 1);
    }

    #[test]
    fn zero_price_round_trip_is_nan() {
        // 10000 / 0 buys infinite shares; selling them at 0 gives NaN
        let value = run(&[0.0, 0.0, 5.0], &[Buy, Sell, Hold]).unwrap();
        assert!(value.is_nan());
    }

    #[test]
    fn single_price_series() {
        assert_eq!(run(&[42.0], &[Hold]).unwrap(), STARTING_CAPITAL);
        assert_relative_eq!(run(&[42.0], &[Buy]).unwrap(), STARTING_CAPITAL);
    }
}
