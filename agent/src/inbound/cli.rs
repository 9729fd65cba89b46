//! Interactive read-eval-print loop.
//!
//! The loop is generic over its input and output streams so it can run
//! against the terminal or against in-memory buffers.

use std::io::{self, BufRead, Write};

use tracing::info;

use crate::domain::ports::Orchestrator;
use crate::domain::{ConversationInput, ConversationService, Session};

const TITLE: &str = "🤖 DataGen Agent (Gemini Edition)";
const RULE_WIDTH: usize = 60;
const PROMPT: &str = "You: ";
const REPLY_PREFIX: &str = "Agent: ";
const FAREWELL: &str = "👋 Goodbye!";
const USAGE: &str = "\
Generate sample user data and save to JSON files.

Examples:
  - Generate users named John, Jane, Mike and save to users.json
  - Create users with last names Smith, Jones
  - Make users aged 25–35 with company.com emails

Commands: 'quit' or 'exit' to end";

/// Write the start-up banner.
///
/// # Errors
///
/// Returns any error raised by `output`.
pub fn write_banner<W: Write>(output: &mut W) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(output, "{rule}")?;
    writeln!(output, "{TITLE}")?;
    writeln!(output, "{rule}")?;
    writeln!(output, "{USAGE}")?;
    writeln!(output, "{rule}")
}

/// Terminal front end for a [`ConversationService`].
pub struct Repl<O: ?Sized> {
    service: ConversationService<O>,
}

impl<O> Repl<O>
where
    O: Orchestrator + ?Sized,
{
    /// Wrap `service` in a REPL.
    pub const fn new(service: ConversationService<O>) -> Self {
        Self { service }
    }

    /// Run until the user exits or `input` ends, returning the session.
    ///
    /// # Errors
    ///
    /// Returns an error only when reading `input` or writing `output` fails;
    /// orchestrator failures are shown as replies.
    pub async fn run<R, W>(&self, mut input: R, output: &mut W) -> io::Result<Session>
    where
        R: BufRead,
        W: Write,
    {
        write_banner(output)?;
        let mut session = Session::new();
        let mut line = String::new();

        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            line.clear();
            let message = if input.read_line(&mut line)? == 0 {
                ConversationInput::Exit
            } else {
                ConversationInput::parse(&line)
            };
            let ConversationInput::Message(message) = message else {
                writeln!(output, "{FAREWELL}")?;
                break;
            };

            write!(output, "{REPLY_PREFIX}")?;
            output.flush()?;
            let reply = self.service.respond(&mut session, &message).await;
            writeln!(output, "{reply}")?;
            writeln!(output)?;
        }

        info!(turns = session.len(), "session ended");
        Ok(session)
    }
}
