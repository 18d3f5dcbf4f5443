//! Core domain types and the numeric pipeline.

pub mod price;
pub mod moving_average;
pub mod signal;
pub mod portfolio;
pub mod backtest;
pub mod config_validation;
pub mod strategy;
pub mod error;
