//! Concrete adapter implementations for ports.

#[cfg(feature = "alpha-vantage")]
pub mod alpha_vantage_adapter;
pub mod console_report;
pub mod csv_adapter;
pub mod csv_report;
pub mod file_config_adapter;
