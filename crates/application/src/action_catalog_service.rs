use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use stackrun_core::{AppError, AppResult};
use stackrun_domain::{
    ActionDefinition, ActionDefinitionInput, AuditAction, RunnerType, RunnerTypeInput,
};
use tracing::info;

use crate::{ActionRegistry, AuditEvent, AuditRepository};

const CATALOG_SUBJECT: &str = "system";

/// Runner type registration payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRunnerTypeInput {
    /// Unique runner type name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Enabled/disabled flag.
    pub enabled: bool,
    /// Runner parameter metadata keyed by parameter name.
    pub runner_parameters: BTreeMap<String, Value>,
    /// Required runner parameter names.
    pub required_parameters: Vec<String>,
}

/// Action registration payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveActionInput {
    /// Stable action identifier.
    pub id: String,
    /// Action name.
    pub name: String,
    /// Owning pack.
    pub pack: String,
    /// Optional description.
    pub description: Option<String>,
    /// Enabled/disabled flag.
    pub enabled: bool,
    /// Runner type name.
    pub runner_type: String,
    /// Action parameter metadata keyed by parameter name.
    pub parameters: BTreeMap<String, Value>,
    /// Required action parameter names.
    pub required_parameters: Vec<String>,
}

/// Maintains the action and runner type registry that executions resolve
/// against.
#[derive(Clone)]
pub struct ActionCatalogService {
    registry: Arc<dyn ActionRegistry>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl ActionCatalogService {
    /// Creates a catalog service.
    #[must_use]
    pub fn new(
        registry: Arc<dyn ActionRegistry>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            registry,
            audit_repository,
        }
    }

    /// Registers or replaces one runner type.
    pub async fn save_runner_type(&self, input: SaveRunnerTypeInput) -> AppResult<RunnerType> {
        let runner_type = RunnerType::new(RunnerTypeInput {
            name: input.name,
            description: input.description,
            enabled: input.enabled,
            runner_parameters: input.runner_parameters,
            required_parameters: input.required_parameters,
        })?;

        self.registry.save_runner_type(runner_type.clone()).await?;
        self.audit_repository
            .append_event(AuditEvent {
                subject: CATALOG_SUBJECT.to_owned(),
                action: AuditAction::RunnerTypeSaved,
                resource_type: "runner_type".to_owned(),
                resource_id: runner_type.name().as_str().to_owned(),
                detail: Some(format!(
                    "saved runner type with {} parameter(s)",
                    runner_type.runner_parameters().len()
                )),
            })
            .await?;

        info!(runner_type = %runner_type.name().as_str(), "runner type saved");
        Ok(runner_type)
    }

    /// Registers or replaces one action. Its runner type must already exist.
    pub async fn save_action(&self, input: SaveActionInput) -> AppResult<ActionDefinition> {
        let action = ActionDefinition::new(ActionDefinitionInput {
            id: input.id,
            name: input.name,
            pack: input.pack,
            description: input.description,
            enabled: input.enabled,
            runner_type: input.runner_type,
            parameters: input.parameters,
            required_parameters: input.required_parameters,
        })?;

        if self
            .registry
            .find_runner_type(action.runner_type().as_str())
            .await?
            .is_none()
        {
            return Err(AppError::Validation(format!(
                "unknown runner type '{}' for action '{}'",
                action.runner_type().as_str(),
                action.ref_name()
            )));
        }

        self.registry.save_action(action.clone()).await?;
        self.audit_repository
            .append_event(AuditEvent {
                subject: CATALOG_SUBJECT.to_owned(),
                action: AuditAction::ActionSaved,
                resource_type: "action".to_owned(),
                resource_id: action.id().as_str().to_owned(),
                detail: Some(format!(
                    "saved action '{}' (enabled: {})",
                    action.ref_name(),
                    action.enabled()
                )),
            })
            .await?;

        info!(action = %action.ref_name(), enabled = action.enabled(), "action saved");
        Ok(action)
    }

    /// Lists registered actions.
    pub async fn list_actions(&self) -> AppResult<Vec<ActionDefinition>> {
        self.registry.list_actions().await
    }
}
