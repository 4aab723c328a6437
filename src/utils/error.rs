use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid header {name}: {reason}")]
    InvalidHeaderError { name: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Io,
    Data,
}

impl ProbeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProbeError::HttpError(_) => ErrorCategory::Network,
            ProbeError::IoError(_) => ErrorCategory::Io,
            ProbeError::SerializationError(_) => ErrorCategory::Data,
            ProbeError::ConfigError { .. }
            | ProbeError::InvalidConfigValueError { .. }
            | ProbeError::InvalidHeaderError { .. } => ErrorCategory::Configuration,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
