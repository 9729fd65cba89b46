//! Domain ports and supporting types for the hexagonal boundary.

mod orchestrator;

#[cfg(test)]
pub use orchestrator::MockOrchestrator;
pub use orchestrator::{Orchestrator, OrchestratorError};
