//! Statement builder error types
//!
//! Defines the error conditions raised while rendering statements.

use thiserror::Error;

/// Errors that can occur while building statements
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QlError {
    /// One or more required arguments were empty or absent
    #[error("Invalid argument: missing {}", .missing.join(", "))]
    InvalidArgument {
        /// Names of the missing arguments, in declaration order
        missing: Vec<&'static str>,
    },

    /// The builder lacks state required to render a statement
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Result type for statement building
pub type QlResult<T> = Result<T, QlError>;
