use std::collections::HashMap;

use async_trait::async_trait;
use stackrun_application::{ActionExecution, ExecutionListQuery, ExecutionRepository};
use stackrun_core::{AppError, AppResult};
use stackrun_domain::ExecutionStatus;
use tokio::sync::RwLock;

/// In-memory execution repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryExecutionRepository {
    executions: RwLock<HashMap<String, ActionExecution>>,
}

impl InMemoryExecutionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            executions: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ExecutionRepository for InMemoryExecutionRepository {
    async fn find_execution(&self, execution_id: &str) -> AppResult<Option<ActionExecution>> {
        Ok(self.executions.read().await.get(execution_id).cloned())
    }

    async fn list_executions(
        &self,
        query: &ExecutionListQuery,
    ) -> AppResult<Vec<ActionExecution>> {
        let executions = self.executions.read().await;

        let mut values: Vec<ActionExecution> = executions
            .values()
            .filter(|execution| {
                query
                    .action_id
                    .as_deref()
                    .is_none_or(|action_id| execution.action.id == action_id)
                    && query
                        .action_name
                        .as_deref()
                        .is_none_or(|action_name| execution.action.name == action_name)
                    && query.status.is_none_or(|status| execution.status == status)
            })
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            right
                .start_timestamp
                .cmp(&left.start_timestamp)
                .then_with(|| left.execution_id.cmp(&right.execution_id))
        });

        Ok(values
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }

    async fn save_execution(&self, execution: ActionExecution) -> AppResult<ActionExecution> {
        self.executions
            .write()
            .await
            .insert(execution.execution_id.clone(), execution.clone());

        Ok(execution)
    }

    async fn update_execution_status(
        &self,
        execution_id: &str,
        status: ExecutionStatus,
    ) -> AppResult<ActionExecution> {
        let mut executions = self.executions.write().await;
        let execution = executions.get_mut(execution_id).ok_or_else(|| {
            AppError::NotFound(format!("execution '{execution_id}' does not exist"))
        })?;

        execution.status = status;
        Ok(execution.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use serde_json::{Map, Value};
    use stackrun_application::{ActionExecution, ExecutionListQuery, ExecutionRepository};
    use stackrun_domain::{ExecutionActionRef, ExecutionStatus};

    use super::InMemoryExecutionRepository;

    fn execution(id: &str, action_name: &str, minutes_ago: i64) -> ActionExecution {
        ActionExecution {
            execution_id: id.to_owned(),
            action: ExecutionActionRef {
                id: format!("action-{action_name}"),
                name: action_name.to_owned(),
                pack: "core".to_owned(),
            },
            parameters: Map::new(),
            status: ExecutionStatus::Scheduled,
            result: Value::Null,
            context: Map::new(),
            start_timestamp: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn query(action_name: Option<&str>, limit: usize, offset: usize) -> ExecutionListQuery {
        ExecutionListQuery {
            action_id: None,
            action_name: action_name.map(str::to_owned),
            status: None,
            limit,
            offset,
        }
    }

    #[tokio::test]
    async fn list_returns_newest_first_with_paging() {
        let repository = InMemoryExecutionRepository::new();
        for (id, minutes_ago) in [("e-1", 3), ("e-2", 1), ("e-3", 2)] {
            assert!(
                repository
                    .save_execution(execution(id, "echo", minutes_ago))
                    .await
                    .is_ok()
            );
        }

        let page = repository
            .list_executions(&query(None, 2, 1))
            .await
            .unwrap_or_default();

        let ids: Vec<&str> = page.iter().map(|value| value.execution_id.as_str()).collect();
        assert_eq!(ids, vec!["e-3", "e-1"]);
    }

    #[tokio::test]
    async fn list_filters_by_action_name() {
        let repository = InMemoryExecutionRepository::new();
        assert!(repository.save_execution(execution("e-1", "echo", 1)).await.is_ok());
        assert!(repository.save_execution(execution("e-2", "sleep", 1)).await.is_ok());

        let page = repository
            .list_executions(&query(Some("sleep"), 50, 0))
            .await
            .unwrap_or_default();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].execution_id, "e-2");
    }

    #[tokio::test]
    async fn status_update_requires_existing_execution() {
        let repository = InMemoryExecutionRepository::new();

        let missing = repository
            .update_execution_status("e-404", ExecutionStatus::Scheduled)
            .await;
        assert!(missing.is_err());

        assert!(repository.save_execution(execution("e-1", "echo", 1)).await.is_ok());
        let updated = repository
            .update_execution_status("e-1", ExecutionStatus::Running)
            .await;
        assert!(matches!(updated, Ok(value) if value.status == ExecutionStatus::Running));
    }
}
