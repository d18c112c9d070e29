//! Validation error types

use std::fmt;

/// Validation error for caller-supplied values
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Numeric value outside its accepted range
    OutOfRange { field: &'static str, reason: &'static str },

    /// Lower bound greater than upper bound
    InvertedRange { min: i32, max: i32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } | Self::OutOfRange { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::InvertedRange { min, max } => {
                write!(f, "minimum price {} is greater than maximum price {}", min, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
