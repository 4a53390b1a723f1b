//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Timestamp could not be parsed in any accepted format
    InvalidTimestamp { field: &'static str, value: String },

    /// Query string, path segment or body failed to deserialize
    Malformed { location: &'static str, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimestamp { field, value } => write!(
                f,
                "{} must be an ISO 8601 datetime or unix timestamp, got '{}'",
                field, value
            ),
            Self::Malformed { location, reason } => write!(f, "invalid {}: {}", location, reason),
        }
    }
}

impl std::error::Error for ValidationError {}
