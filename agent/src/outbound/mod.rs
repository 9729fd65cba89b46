//! Outbound adapters for driven ports.

pub mod gemini;
