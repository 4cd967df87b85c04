use std::fmt;
use thiserror::Error;

/// Stable machine codes carried by [`PayUError::DomainError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidParameters,
    ApiError,
    JsonDeserializationError,
    JsonSerializationError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidParameters => "INVALID_PARAMETERS",
            Self::ApiError => "API_ERROR",
            Self::JsonDeserializationError => "JSON_DESERIALIZATION_ERROR",
            Self::JsonSerializationError => "JSON_SERIALIZATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum PayUError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Domain error: {code} - {message}")]
    DomainError { code: ErrorCode, message: String },

    #[error("Connection error (status {}): {message}", .status.map_or_else(|| "n/a".to_string(), |s| s.to_string()))]
    ConnectionError {
        status: Option<u16>,
        message: String,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::core::config::ConfigError),
}

impl PayUError {
    pub fn domain(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::DomainError {
            code,
            message: message.into(),
        }
    }

    pub fn missing_parameter(name: &str) -> Self {
        Self::InvalidArgument(format!("the parameter [{}] is required", name))
    }

    /// Machine code of a domain error, if this is one
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::DomainError { code, .. } => Some(*code),
            _ => None,
        }
    }
}
