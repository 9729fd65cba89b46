//! Error types for the sample-data crate.
//!
//! Generation errors double as user-facing messages: the tool layer reports
//! them verbatim, so their display strings are part of the contract.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Reasons a generation request is rejected.
///
/// Variants are listed in the order validation checks them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No first names were supplied.
    #[error("first_names list cannot be empty.")]
    EmptyFirstNames,

    /// No last names were supplied.
    #[error("last_names list cannot be empty.")]
    EmptyLastNames,

    /// No e-mail domains were supplied.
    #[error("domains list cannot be empty.")]
    EmptyDomains,

    /// The age bounds are inverted.
    #[error("min_age {min_age} cannot be greater than max_age {max_age}.")]
    InvertedAgeRange {
        /// Requested lower bound.
        min_age: i64,
        /// Requested upper bound.
        max_age: i64,
    },

    /// One of the age bounds is negative.
    #[error("Ages must be non-negative.")]
    NegativeAge,

    /// No cities were supplied.
    #[error("city list cannot be empty")]
    EmptyCities,
}

/// Failures while reading or writing a JSON file.
///
/// Each kind renders with a distinct prefix so a reader of the tool output
/// can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonFileError {
    /// The file, or its parent directory, does not exist.
    #[error("Error: File '{path}' not found")]
    NotFound {
        /// Requested path.
        path: Utf8PathBuf,
    },

    /// The file exists but does not hold valid JSON.
    #[error("Error: Invalid JSON in file '{path}'")]
    InvalidJson {
        /// Requested path.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// Any other failure while reading.
    #[error("Error reading JSON: {message}")]
    Read {
        /// Requested path.
        path: Utf8PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// Any failure while serialising or writing.
    #[error("Error writing JSON: {message}")]
    Write {
        /// Requested path.
        path: Utf8PathBuf,
        /// Description of the failure.
        message: String,
    },
}

impl JsonFileError {
    /// Returns the path the failed operation targeted.
    #[must_use]
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::NotFound { path }
            | Self::InvalidJson { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. } => path,
        }
    }
}
