//! Error types for fixture loading.

use mosaic_chart::{CurveError, TimeRange};
use std::fmt;
use std::path::PathBuf;

/// Error type for fixture parsing and validation.
#[derive(Debug)]
pub enum ParseError {
    /// YAML parsing error
    Yaml(serde_yaml_ng::Error),
    /// Fixture file could not be read
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// A curve's anchors are unusable
    Curve {
        /// Time range the curve belongs to
        mode: TimeRange,
        /// What is wrong with it
        source: CurveError,
    },
    /// Validation error
    Validation(String),
    /// Invalid value
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml(e) => write!(f, "YAML error: {e}"),
            Self::Io { path, source } => write!(f, "Cannot read {}: {source}", path.display()),
            Self::Curve { mode, source } => write!(f, "Invalid {mode} curve: {source}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Yaml(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            Self::Curve { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_yaml_ng::Error> for ParseError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        Self::Yaml(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::InvalidValue {
            field: "viewport.width".to_string(),
            message: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'viewport.width': must be positive"
        );

        let err = ParseError::Validation("duplicate item 'Gym'".to_string());
        assert_eq!(err.to_string(), "Validation error: duplicate item 'Gym'");

        let err = ParseError::Curve {
            mode: TimeRange::Monthly,
            source: CurveError::TooFewAnchors(1),
        };
        assert_eq!(
            err.to_string(),
            "Invalid monthly curve: a curve needs at least 2 anchors, got 1"
        );
        assert!(err.source().is_some());
    }
}
