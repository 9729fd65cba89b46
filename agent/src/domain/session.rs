//! Exchange history for one CLI run.
//!
//! A [`Session`] is owned by the REPL and handed to the conversation service
//! by mutable reference. Nothing is persisted once the process exits.

/// One human input paired with the agent reply it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Text the user typed, already trimmed.
    pub human: String,
    /// Reply shown to the user, including failure replies.
    pub agent: String,
}

/// Ordered, append-only record of the turns in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    history: Vec<Turn>,
}

impl Session {
    /// Starts an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns recorded so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Appends a completed turn.
    pub fn record(&mut self, human: impl Into<String>, agent: impl Into<String>) {
        self.history.push(Turn {
            human: human.into(),
            agent: agent.into(),
        });
    }

    /// Number of recorded turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether no turn has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_empty() {
        let session = Session::new();
        assert!(session.is_empty());
        assert_eq!(session.len(), 0);
        assert!(session.history().is_empty());
    }

    #[test]
    fn turns_are_kept_in_order() {
        let mut session = Session::new();
        session.record("first", "one");
        session.record("second".to_owned(), "two".to_owned());

        let humans: Vec<&str> = session
            .history()
            .iter()
            .map(|turn| turn.human.as_str())
            .collect();
        assert_eq!(humans, ["first", "second"]);
        assert_eq!(session.len(), 2);
    }
}
