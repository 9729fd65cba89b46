//! Driven port for the model runtime that decides tool calls and composes
//! replies.
//!
//! The domain hands over the session history and the new input, and gets
//! back the final reply text. How the adapter reaches a model, and how many
//! tool round trips it needs, stay behind this boundary.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::session::Turn;

/// Errors surfaced while asking the orchestrator for a reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    /// Network transport failed before a response arrived.
    #[error("orchestrator transport failed: {message}")]
    Transport { message: String },
    /// The call exceeded its timeout.
    #[error("orchestrator request timed out: {message}")]
    Timeout { message: String },
    /// The orchestrator rate-limited the request.
    #[error("orchestrator rate limited request: {message}")]
    RateLimited { message: String },
    /// The orchestrator refused the request as invalid or blocked.
    #[error("orchestrator rejected request: {message}")]
    Rejected { message: String },
    /// The response could not be decoded.
    #[error("orchestrator response decode failed: {message}")]
    Decode { message: String },
    /// The orchestrator finished without any reply text.
    #[error("orchestrator returned no reply text")]
    EmptyReply,
    /// Tool round trips did not settle within the step cap.
    #[error("orchestrator did not produce a reply within {max_steps} steps")]
    StepLimitExceeded { max_steps: u32 },
}

impl OrchestratorError {
    /// Builds a [`Self::Transport`] error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Builds a [`Self::Timeout`] error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Builds a [`Self::RateLimited`] error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Builds a [`Self::Rejected`] error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Builds a [`Self::Decode`] error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Builds [`Self::EmptyReply`].
    #[must_use]
    pub const fn empty_reply() -> Self {
        Self::EmptyReply
    }

    /// Builds a [`Self::StepLimitExceeded`] error for a cap of `max_steps`.
    #[must_use]
    pub const fn step_limit_exceeded(max_steps: u32) -> Self {
        Self::StepLimitExceeded { max_steps }
    }

    /// Return whether retrying this error is expected to help.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

/// Port for turning one user input into a reply.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Produce the reply to `input` given the earlier turns of the session.
    async fn converse(&self, history: &[Turn], input: &str) -> Result<String, OrchestratorError>;
}
