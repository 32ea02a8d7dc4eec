//! Path segment validation
//!
//! Accounts and model ids are interpolated into store paths, so they are
//! checked for characters that would change the addressed resource. Model
//! field definitions are not validated.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for an account or machine name segment
pub const MAX_SEGMENT_LENGTH: usize = 255;

/// No path separators, query/fragment markers, or whitespace
static SEGMENT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^/?#\s]+$").unwrap());

/// Path segment validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentValidationError {
    /// Segment is empty
    Empty { kind: &'static str },
    /// Segment exceeds maximum length
    TooLong {
        kind: &'static str,
        length: usize,
        max: usize,
    },
    /// Segment contains characters that alter the store path
    InvalidFormat { kind: &'static str, value: String },
}

impl fmt::Display for SegmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { kind } => write!(f, "{} cannot be empty", kind),
            Self::TooLong { kind, length, max } => {
                write!(f, "{} too long: {} characters (max {})", kind, length, max)
            }
            Self::InvalidFormat { kind, value } => write!(
                f,
                "Invalid {} '{}': must not be '.' or '..' or contain '/', '?', '#' or whitespace",
                kind, value
            ),
        }
    }
}

impl std::error::Error for SegmentValidationError {}

fn validate_segment(kind: &'static str, value: &str) -> Result<(), SegmentValidationError> {
    if value.is_empty() {
        return Err(SegmentValidationError::Empty { kind });
    }

    if value.len() > MAX_SEGMENT_LENGTH {
        return Err(SegmentValidationError::TooLong {
            kind,
            length: value.len(),
            max: MAX_SEGMENT_LENGTH,
        });
    }

    if value == "." || value == ".." || !SEGMENT_PATTERN.is_match(value) {
        return Err(SegmentValidationError::InvalidFormat {
            kind,
            value: value.to_string(),
        });
    }

    Ok(())
}

/// Validate an account namespace
pub fn validate_account(account: &str) -> Result<(), SegmentValidationError> {
    validate_segment("account", account)
}

/// Validate a model id or machine name
pub fn validate_machine_name(id: &str) -> Result<(), SegmentValidationError> {
    validate_segment("machine name", id)
}
