//! Shared error type across rollcall crates.

use thiserror::Error;

/// Stable error codes, used in logs and asserted by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration failed to parse or validate.
    InvalidConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Metric name is not valid for the exposition format.
    InvalidMetricName,
    /// A metric family with this name is already registered.
    DuplicateMetric,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::InvalidMetricName => "INVALID_METRIC_NAME",
            ErrorCode::DuplicateMetric => "DUPLICATE_METRIC",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RollcallError>;

/// Unified error type used by core and exporter.
///
/// Only startup paths produce these. Event handling is infallible.
#[derive(Debug, Error)]
pub enum RollcallError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("invalid metric name: {0}")]
    InvalidMetricName(String),
    #[error("metric already registered: {0}")]
    DuplicateMetric(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl RollcallError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            RollcallError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            RollcallError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            RollcallError::InvalidMetricName(_) => ErrorCode::InvalidMetricName,
            RollcallError::DuplicateMetric(_) => ErrorCode::DuplicateMetric,
            RollcallError::Internal(_) => ErrorCode::Internal,
        }
    }
}
