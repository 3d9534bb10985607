use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted once when an execution record is first persisted.
    ExecutionCreated,
    /// Emitted when an update changed the status or result of an execution.
    ExecutionUpdated,
    /// Emitted when an action definition is registered or replaced.
    ActionSaved,
    /// Emitted when a runner type is registered or replaced.
    RunnerTypeSaved,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExecutionCreated => "execution.created",
            Self::ExecutionUpdated => "execution.updated",
            Self::ActionSaved => "action.saved",
            Self::RunnerTypeSaved => "runner_type.saved",
        }
    }
}
