//! Validation error types
//!
//! The `Display` text of each variant is what clients see in the envelope
//! `message`, so wording here is part of the HTTP contract.

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Path identifier is not an integer
    InvalidId { resource: &'static str },

    /// Single required value is missing or blank
    Required { field: &'static str },

    /// One of several required values is missing or blank
    MissingFields { fields: &'static str },

    /// Partial update carried none of the recognized fields
    NoFieldsToUpdate,

    /// Range parameters are unparseable, negative, or inverted
    InvalidRange { field: &'static str },

    /// Request body could not be decoded
    MalformedBody(String),

    /// Query string could not be decoded
    MalformedQuery(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { resource } => write!(f, "Invalid {} ID", resource),
            Self::Required { field } => write!(f, "{} is required", field),
            Self::MissingFields { fields } => write!(f, "{} are required", fields),
            Self::NoFieldsToUpdate => f.write_str("No fields to update"),
            Self::InvalidRange { field } => write!(f, "Invalid {} parameters", field),
            Self::MalformedBody(reason) => write!(f, "Invalid request body: {}", reason),
            Self::MalformedQuery(reason) => write!(f, "Invalid query string: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Parse a path segment as a row identifier.
///
/// Only a complete integer is accepted; `"12abc"` is rejected rather than
/// read as `12`.
pub fn parse_id(raw: &str, resource: &'static str) -> Result<i32, ValidationError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidId { resource })
}
