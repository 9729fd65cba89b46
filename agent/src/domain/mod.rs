//! Domain layer: the tool registry, session history, conversation service
//! and the orchestrator port they talk through.

pub mod conversation;
pub mod ports;
pub mod session;
pub mod tools;

pub use conversation::{ConversationInput, ConversationService, failure_reply};
pub use session::{Session, Turn};
pub use tools::{ToolDefinition, ToolRegistry};
