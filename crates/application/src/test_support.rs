use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use stackrun_core::{AppError, AppResult};
use stackrun_domain::{ActionDefinition, ActionReference, ExecutionStatus, RunnerType};
use tokio::sync::Mutex;

use crate::{
    ActionExecution, ActionRegistry, AuditEvent, AuditRepository, ExecutionListQuery,
    ExecutionRepository, ParameterValidator,
};

#[derive(Default)]
pub(crate) struct FakeExecutionRepository {
    pub(crate) executions: Mutex<Vec<ActionExecution>>,
    pub(crate) fail_lookups: bool,
    pub(crate) last_list_query: Mutex<Option<ExecutionListQuery>>,
}

impl FakeExecutionRepository {
    pub(crate) fn failing() -> Self {
        Self {
            fail_lookups: true,
            ..Self::default()
        }
    }

    pub(crate) async fn count(&self) -> usize {
        self.executions.lock().await.len()
    }
}

#[async_trait]
impl ExecutionRepository for FakeExecutionRepository {
    async fn find_execution(&self, execution_id: &str) -> AppResult<Option<ActionExecution>> {
        if self.fail_lookups {
            return Err(AppError::Internal("connection refused".to_owned()));
        }

        Ok(self
            .executions
            .lock()
            .await
            .iter()
            .find(|execution| execution.execution_id == execution_id)
            .cloned())
    }

    async fn list_executions(
        &self,
        query: &ExecutionListQuery,
    ) -> AppResult<Vec<ActionExecution>> {
        *self.last_list_query.lock().await = Some(query.clone());

        let mut executions: Vec<ActionExecution> = self
            .executions
            .lock()
            .await
            .iter()
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
        executions.sort_by(|left, right| right.start_timestamp.cmp(&left.start_timestamp));

        Ok(executions
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }

    async fn save_execution(&self, execution: ActionExecution) -> AppResult<ActionExecution> {
        let mut executions = self.executions.lock().await;
        match executions
            .iter_mut()
            .find(|stored| stored.execution_id == execution.execution_id)
        {
            Some(stored) => *stored = execution.clone(),
            None => executions.push(execution.clone()),
        }

        Ok(execution)
    }

    async fn update_execution_status(
        &self,
        execution_id: &str,
        status: ExecutionStatus,
    ) -> AppResult<ActionExecution> {
        let mut executions = self.executions.lock().await;
        let execution = executions
            .iter_mut()
            .find(|stored| stored.execution_id == execution_id)
            .ok_or_else(|| AppError::NotFound(format!("execution '{execution_id}' not found")))?;

        execution.status = status;
        Ok(execution.clone())
    }
}

#[derive(Default)]
pub(crate) struct FakeActionRegistry {
    pub(crate) actions: Mutex<Vec<ActionDefinition>>,
    pub(crate) runner_types: Mutex<HashMap<String, RunnerType>>,
}

#[async_trait]
impl ActionRegistry for FakeActionRegistry {
    async fn resolve_action(
        &self,
        reference: &ActionReference,
    ) -> AppResult<Option<ActionDefinition>> {
        Ok(self
            .actions
            .lock()
            .await
            .iter()
            .find(|action| reference.matches(action))
            .cloned())
    }

    async fn find_runner_type(&self, name: &str) -> AppResult<Option<RunnerType>> {
        Ok(self.runner_types.lock().await.get(name).cloned())
    }

    async fn list_actions(&self) -> AppResult<Vec<ActionDefinition>> {
        Ok(self.actions.lock().await.clone())
    }

    async fn save_action(&self, action: ActionDefinition) -> AppResult<()> {
        let mut actions = self.actions.lock().await;
        actions.retain(|stored| stored.id() != action.id());
        actions.push(action);
        Ok(())
    }

    async fn save_runner_type(&self, runner_type: RunnerType) -> AppResult<()> {
        self.runner_types
            .lock()
            .await
            .insert(runner_type.name().as_str().to_owned(), runner_type);
        Ok(())
    }
}

/// Checks `required` and `additionalProperties: false` only.
pub(crate) struct FakeParameterValidator;

impl ParameterValidator for FakeParameterValidator {
    fn validate(&self, parameters: &Map<String, Value>, schema: &Value) -> AppResult<()> {
        if let Some(required) = schema.get("required").and_then(Value::as_array) {
            for name in required.iter().filter_map(Value::as_str) {
                if !parameters.contains_key(name) {
                    return Err(AppError::Validation(format!(
                        "'{name}' is a required property"
                    )));
                }
            }
        }

        if schema.get("additionalProperties") == Some(&Value::Bool(false)) {
            let properties = schema.get("properties").and_then(Value::as_object);
            for name in parameters.keys() {
                if properties.is_none_or(|properties| !properties.contains_key(name)) {
                    return Err(AppError::Validation(format!(
                        "Additional properties are not allowed ('{name}' was unexpected)"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for RecordingAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}
