//! Error types for timestamp conversion.

use crate::column::ColumnValue;
use thiserror::Error;

/// Errors that can occur converting timestamps across the column and
/// binary boundaries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimestampError {
    /// A column scan received a value that is neither a native instant
    /// nor text.
    #[error("unsupported source type for timestamp: {0}")]
    UnsupportedSource(ColumnValue),

    /// Text matched neither accepted layout, or a component was
    /// malformed. Carries the underlying parse error verbatim.
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),

    /// Binary input is not the fixed encoded length.
    #[error("invalid binary timestamp length: expected {expected} bytes, got {actual}")]
    BinaryLength { expected: usize, actual: usize },

    /// Binary input carries an unknown version tag.
    #[error("unsupported binary timestamp version: {0}")]
    BinaryVersion(u8),

    /// Binary fields decode to an instant outside the representable range.
    #[error("binary timestamp fields are out of range")]
    BinaryOutOfRange,
}

impl TimestampError {
    /// Returns true if this error rejected an unsupported scan source.
    #[must_use]
    pub fn is_unsupported_source(&self) -> bool {
        matches!(self, TimestampError::UnsupportedSource(_))
    }

    /// Returns true if this error wraps a textual parse failure.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, TimestampError::Parse(_))
    }
}

/// A parameter that failed validation, with the offending value rendered
/// into the message and the underlying cause reachable via `source()`.
#[derive(Debug, Error)]
#[error("invalid parameter: {parameter}")]
pub struct InvalidParameter {
    /// Rendering of the rejected parameter.
    pub parameter: String,
    /// The lower-level error that triggered the rejection, if any.
    #[source]
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl InvalidParameter {
    /// Creates an error for the given parameter with no underlying cause.
    pub fn new(parameter: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            cause: None,
        }
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}
