use async_trait::async_trait;
use stackrun_core::AppResult;
use stackrun_domain::ExecutionStatus;

use super::records::{ActionExecution, ExecutionListQuery};

/// Repository port for action execution records.
#[async_trait]
pub trait ExecutionRepository: Send + Sync {
    /// Returns one execution by identifier.
    async fn find_execution(&self, execution_id: &str) -> AppResult<Option<ActionExecution>>;

    /// Lists executions matching the query, newest `start_timestamp` first.
    async fn list_executions(&self, query: &ExecutionListQuery)
    -> AppResult<Vec<ActionExecution>>;

    /// Inserts or fully replaces one execution.
    async fn save_execution(&self, execution: ActionExecution) -> AppResult<ActionExecution>;

    /// Sets the status of one stored execution and returns the updated record.
    async fn update_execution_status(
        &self,
        execution_id: &str,
        status: ExecutionStatus,
    ) -> AppResult<ActionExecution>;
}
