//! Error types for reading and patching source records.

use matter_yaml::EncodeError;
use thiserror::Error;

/// Errors from parsing, patching or rendering a [`crate::SourceRecord`].
#[derive(Debug, Error)]
pub enum Error {
    /// Patch keys must be non-empty strings.
    #[error("patch entry {index} has an empty key")]
    EmptyKey { index: usize },

    /// The value for `key` could not be turned into a header node.
    ///
    /// Entries before this one have already been applied, and the decoded
    /// view already holds the value.
    #[error("cannot encode value for key `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: EncodeError,
    },

    #[error(transparent)]
    Yaml(#[from] matter_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
