//! DataGen agent library.
//!
//! A command-line assistant that turns natural-language requests into
//! generated sample users and JSON files. The domain layer owns the tool
//! registry, the session history and the conversation service; a Gemini
//! adapter decides which tools to call; the CLI adapter drives the loop.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
