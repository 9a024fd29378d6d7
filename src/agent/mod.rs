//! Agent turn orchestration

mod tool_orchestrator;

pub use tool_orchestrator::{ToolOrchestrator, TurnOutcome, TurnPath, MAX_TOOL_CALLS_PER_TURN};
