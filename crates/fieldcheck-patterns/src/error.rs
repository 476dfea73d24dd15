//! Error types for the pattern library.

use thiserror::Error;

/// Errors raised while registering or looking up patterns.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The expression could not be compiled.
    #[error("invalid pattern `{pattern}`: {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// No pattern is registered under this name.
    #[error("unknown pattern: {0}")]
    Unknown(String),
}

impl PatternError {
    pub(crate) fn invalid(pattern: impl Into<String>, source: regex::Error) -> Self {
        PatternError::Invalid {
            pattern: pattern.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PatternError>;
