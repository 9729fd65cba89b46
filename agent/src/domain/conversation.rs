//! Conversation driver core: exit parsing and the single-turn service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{Orchestrator, OrchestratorError};
use crate::domain::session::Session;

const EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];

/// Classified line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationInput {
    /// The user asked to leave, or sent an empty line.
    Exit,
    /// Trimmed text to forward to the orchestrator.
    Message(String),
}

impl ConversationInput {
    /// Classify one raw input line.
    ///
    /// Surrounding whitespace is ignored. An empty line, or `quit`, `exit`
    /// or `q` in any letter case, means [`ConversationInput::Exit`].
    ///
    /// # Examples
    ///
    /// ```
    /// use datagen::domain::ConversationInput;
    ///
    /// assert_eq!(ConversationInput::parse("  QUIT \n"), ConversationInput::Exit);
    /// assert_eq!(
    ///     ConversationInput::parse(" make 3 users "),
    ///     ConversationInput::Message("make 3 users".to_owned())
    /// );
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let is_exit = trimmed.is_empty()
            || EXIT_COMMANDS
                .iter()
                .any(|command| trimmed.eq_ignore_ascii_case(command));
        if is_exit {
            Self::Exit
        } else {
            Self::Message(trimmed.to_owned())
        }
    }
}

/// Reply shown in place of an answer when the orchestrator fails.
#[must_use]
pub fn failure_reply(error: &OrchestratorError) -> String {
    format!("❌ Error: {error}\nPlease try again.")
}

/// Runs one turn at a time against an [`Orchestrator`].
pub struct ConversationService<O: ?Sized> {
    orchestrator: Arc<O>,
}

impl<O> ConversationService<O>
where
    O: Orchestrator + ?Sized,
{
    /// Create a service backed by `orchestrator`.
    pub const fn new(orchestrator: Arc<O>) -> Self {
        Self { orchestrator }
    }

    /// Answer `input` and record the turn in `session`.
    ///
    /// Orchestrator failures never escape: they become a
    /// [`failure_reply`], which is recorded like any other reply so the
    /// session can continue.
    pub async fn respond(&self, session: &mut Session, input: &str) -> String {
        info!(turn = session.len() + 1, "forwarding input to orchestrator");
        let reply = match self.orchestrator.converse(session.history(), input).await {
            Ok(reply) => reply,
            Err(error) => {
                warn!(%error, retryable = error.is_retryable(), "orchestrator call failed");
                failure_reply(&error)
            }
        };
        session.record(input, reply.clone());
        reply
    }
}
