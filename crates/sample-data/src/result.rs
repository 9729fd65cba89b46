//! Tagged generation outcome as reported to tool callers.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::record::GeneratedUsers;

/// Either the generated users or the validation message, never both.
///
/// Serialises untagged, so callers see `{"users": [...], "count": n}` or
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationResult {
    /// Generation succeeded.
    Users(GeneratedUsers),
    /// The request was rejected.
    Error {
        /// Validation message.
        error: String,
    },
}

impl GenerationResult {
    /// Returns the error message for a rejected request.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Users(_) => None,
            Self::Error { error } => Some(error),
        }
    }
}

impl From<Result<GeneratedUsers, GenerationError>> for GenerationResult {
    fn from(result: Result<GeneratedUsers, GenerationError>) -> Self {
        match result {
            Ok(users) => Self::Users(users),
            Err(err) => Self::Error {
                error: err.to_string(),
            },
        }
    }
}
