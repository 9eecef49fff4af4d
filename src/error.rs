//! Error types for the booth ledger.
//!
//! Internally the crate works with `anyhow` so that failures can carry a chain of context. At the
//! public boundary those are converted, with `IntoResult::pub_result`, into an `Error` that also
//! carries an `ErrorType` so callers can react to the kind of failure without parsing messages.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The result type used internally.
pub(crate) type Res<T> = anyhow::Result<T>;

/// The result type returned by public functions.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies an `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The booth home directory or its `config.json` is missing or invalid.
    Config,
    /// A transaction or material referenced by the caller does not exist.
    NotFound,
    /// A user-supplied import file could not be read or parsed. Prior state is untouched.
    InvalidImportFile,
    /// The state could not be written to storage. The action that triggered the save failed.
    StorageWriteFailure,
    /// The caller supplied input that cannot be interpreted, e.g. an unknown package name.
    InvalidInput,
    /// Anything else.
    Internal,
}

serde_plain::derive_display_from_serialize!(ErrorType);

/// The public error type.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    pub(crate) fn not_found(message: impl Display + Debug + Send + Sync + 'static) -> Self {
        Self::new(ErrorType::NotFound, anyhow::Error::msg(message))
    }

    pub(crate) fn invalid_input(message: impl Display + Debug + Send + Sync + 'static) -> Self {
        Self::new(ErrorType::InvalidInput, anyhow::Error::msg(message))
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.inner)
    }
}

impl std::error::Error for Error {}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Self::new(ErrorType::Internal, value)
    }
}

/// Converts an internal result into a public `Result` tagged with an `ErrorType`.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T> IntoResult<T> for Res<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}
