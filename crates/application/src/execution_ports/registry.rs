use async_trait::async_trait;
use stackrun_core::AppResult;
use stackrun_domain::{ActionDefinition, ActionReference, RunnerType};

/// Registry port for action definitions and runner types.
#[async_trait]
pub trait ActionRegistry: Send + Sync {
    /// Resolves an action reference to its definition.
    async fn resolve_action(
        &self,
        reference: &ActionReference,
    ) -> AppResult<Option<ActionDefinition>>;

    /// Returns one runner type by name.
    async fn find_runner_type(&self, name: &str) -> AppResult<Option<RunnerType>>;

    /// Lists registered actions ordered by pack and name.
    async fn list_actions(&self) -> AppResult<Vec<ActionDefinition>>;

    /// Inserts or replaces one action definition.
    async fn save_action(&self, action: ActionDefinition) -> AppResult<()>;

    /// Inserts or replaces one runner type.
    async fn save_runner_type(&self, runner_type: RunnerType) -> AppResult<()>;
}
