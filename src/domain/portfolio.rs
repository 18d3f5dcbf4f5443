//! All-in/all-out portfolio state.
//!
//! At most one of `cash` and `shares` is nonzero. The initial state (all cash,
//! no shares) counts as the cash side.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioState {
    pub cash: f64,
    pub shares: f64,
}

impl PortfolioState {
    pub fn new(initial_capital: f64) -> Self {
        PortfolioState {
            cash: initial_capital,
            shares: 0.0,
        }
    }

    pub fn is_invested(&self) -> bool {
        self.shares > 0.0
    }

    pub fn can_buy(&self) -> bool {
        self.cash > 0.0
    }

    /// Converts all cash into shares at `price`.
    pub fn buy_all(&mut self, price: f64) {
        self.shares = self.cash / price;
        self.cash = 0.0;
    }

    /// Converts all shares into cash at `price`.
    pub fn sell_all(&mut self, price: f64) {
        self.cash = self.shares * price;
        self.shares = 0.0;
    }

    /// Sells any held shares at `price` and returns the cash balance.
    pub fn liquidate(&mut self, price: f64) -> f64 {
        if self.is_invested() {
            self.sell_all(price);
        }
        self.cash
    }
}
