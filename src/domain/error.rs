//! Domain error types.

/// Top-level error type for macross.
#[derive(Debug, thiserror::Error)]
pub enum MacrossError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("no price data for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("precondition violated: {reason}")]
    PreconditionViolation { reason: String },

    #[error("invalid price {value} at index {index}")]
    InvalidPrice { index: usize, value: f64 },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MacrossError {
    pub(crate) fn precondition(reason: impl Into<String>) -> Self {
        MacrossError::PreconditionViolation {
            reason: reason.into(),
        }
    }

    pub(crate) fn unavailable(symbol: &str, reason: impl Into<String>) -> Self {
        MacrossError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&MacrossError> for std::process::ExitCode {
    fn from(err: &MacrossError) -> Self {
        let code: u8 = match err {
            MacrossError::Io(_) => 1,
            MacrossError::InvalidConfiguration { .. }
            | MacrossError::ConfigParse { .. }
            | MacrossError::ConfigMissing { .. } => 2,
            MacrossError::DataUnavailable { .. } => 3,
            MacrossError::PreconditionViolation { .. } | MacrossError::InvalidPrice { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
