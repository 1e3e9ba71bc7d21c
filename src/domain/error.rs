//! Domain error types.

use crate::domain::indicator::Indicator;

/// Top-level error type for dipscan.
#[derive(Debug, thiserror::Error)]
pub enum DipscanError {
    #[error("insufficient history for {indicator}: need {required} bars, have {available}")]
    InsufficientHistory {
        indicator: Indicator,
        required: usize,
        available: usize,
    },

    #[error("invalid capital: add_capital must be positive, got {value}")]
    InvalidCapital { value: f64 },

    #[error("invalid price: close must be positive, got {value}")]
    InvalidPrice { value: f64 },

    #[error("malformed bar series: {reason}")]
    MalformedSeries { reason: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DipscanError> for std::process::ExitCode {
    fn from(err: &DipscanError) -> Self {
        let code: u8 = match err {
            DipscanError::Io(_) => 1,
            DipscanError::ConfigParse { .. }
            | DipscanError::ConfigInvalid { .. }
            | DipscanError::InvalidCapital { .. }
            | DipscanError::InvalidPrice { .. } => 2,
            DipscanError::Data { .. } | DipscanError::MalformedSeries { .. } => 3,
            DipscanError::InsufficientHistory { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
