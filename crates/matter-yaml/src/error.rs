//! Error types for header parsing, node construction and rendering.

use crate::SourceInfo;
use thiserror::Error;

/// Result type alias for matter-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing a header tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// YAML syntax error
    #[error("YAML parse error: {message}")]
    Parse {
        message: String,
        location: Option<SourceInfo>,
    },

    /// The emitter could not write a value
    #[error("failed to emit YAML: {0}")]
    Emit(String),

    /// A plain value could not be turned into a node
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Failure to build a node from a plain value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("value nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    /// YAML integers are signed 64-bit.
    #[error("integer {value} does not fit in a signed 64-bit YAML integer")]
    IntegerOutOfRange { value: u64 },
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        Error::Parse {
            message: err.info().to_string(),
            location: Some(SourceInfo::from_marker(err.marker(), 0)),
        }
    }
}

impl From<yaml_rust2::EmitError> for Error {
    fn from(err: yaml_rust2::EmitError) -> Self {
        Error::Emit(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_carries_location() {
        let err = yaml_rust2::YamlLoader::load_from_str("title: [unclosed").unwrap_err();
        let err = Error::from(err);

        match &err {
            Error::Parse { message, location } => {
                assert!(!message.is_empty());
                assert!(location.is_some());
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("YAML parse error"));
    }

    #[test]
    fn test_encode_error_display() {
        let err = Error::from(EncodeError::TooDeep { limit: 128 });
        assert_eq!(err.to_string(), "value nests deeper than 128 levels");

        let err = EncodeError::IntegerOutOfRange { value: u64::MAX };
        assert!(err.to_string().contains("18446744073709551615"));
    }
}
