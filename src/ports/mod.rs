//! Port traits for the collaborators around the numeric core.

pub mod config_port;
pub mod price_port;
pub mod report_port;
