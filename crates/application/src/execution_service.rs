use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use stackrun_core::{AppError, AppResult};
use stackrun_domain::{AuditAction, ExecutionStatus, apply_runner_defaults, build_parameter_schema};
use tracing::{debug, error, info, warn};

use crate::execution_ports::{
    ActionExecution, ActionRegistry, CreateExecutionInput, ExecutionListQuery,
    ExecutionRepository, ParameterValidator, UpdateExecutionInput,
};
use crate::{AuditEvent, AuditRepository};

mod context;
mod create;
mod query;
mod update;

pub use context::parse_context_header;

/// Page size used when a listing request does not specify one.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Upper bound applied to listing page sizes.
pub const MAX_LIST_LIMIT: usize = 1000;

const SYSTEM_SUBJECT: &str = "system";

/// Lifecycle gateway for action executions: creation, lookup and updates.
#[derive(Clone)]
pub struct ExecutionService {
    repository: Arc<dyn ExecutionRepository>,
    action_registry: Arc<dyn ActionRegistry>,
    parameter_validator: Arc<dyn ParameterValidator>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl ExecutionService {
    /// Creates an execution service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ExecutionRepository>,
        action_registry: Arc<dyn ActionRegistry>,
        parameter_validator: Arc<dyn ParameterValidator>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            repository,
            action_registry,
            parameter_validator,
            audit_repository,
        }
    }
}

/// Audit subject taken from the `user` key of an execution context.
fn audit_subject(context: &Map<String, Value>) -> String {
    context
        .get("user")
        .and_then(Value::as_str)
        .filter(|user| !user.trim().is_empty())
        .unwrap_or(SYSTEM_SUBJECT)
        .to_owned()
}
