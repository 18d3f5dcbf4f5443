//! macross — moving-average crossover backtester.
//!
//! Hexagonal architecture: the numeric pipeline lives in [`domain`], port
//! traits in [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
