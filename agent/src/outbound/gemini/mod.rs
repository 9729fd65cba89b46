//! Gemini outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `Orchestrator`
//! port on top of the `generateContent` API.

mod dto;
mod http_orchestrator;

pub use http_orchestrator::{
    DEFAULT_SYSTEM_PROMPT, GeminiClientError, GeminiOrchestrator, GeminiSettings,
};
