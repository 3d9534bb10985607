use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use stackrun_domain::{ActionReference, ExecutionActionRef, ExecutionStatus};

/// Persisted action execution record.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionExecution {
    /// Stable execution identifier.
    pub execution_id: String,
    /// Action resolved at creation time.
    pub action: ExecutionActionRef,
    /// Parameters after runner defaults were applied.
    pub parameters: Map<String, Value>,
    /// Current lifecycle status.
    pub status: ExecutionStatus,
    /// Opaque result reported by the execution engine.
    pub result: Value,
    /// Correlation context propagated by the caller.
    pub context: Map<String, Value>,
    /// Creation timestamp.
    pub start_timestamp: DateTime<Utc>,
}

/// Execution creation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateExecutionInput {
    /// Action to execute.
    pub action: ActionReference,
    /// Caller parameters, `None` when the request omitted the field.
    pub parameters: Option<Map<String, Value>>,
    /// Raw correlation context header value.
    pub context_header: Option<String>,
}

/// Partial execution update payload. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateExecutionInput {
    /// Replacement status.
    pub status: Option<ExecutionStatus>,
    /// Replacement result.
    pub result: Option<Value>,
}

/// Execution listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionListQuery {
    /// Optional action identifier filter. Wins over `action_name`.
    pub action_id: Option<String>,
    /// Optional action name filter.
    pub action_name: Option<String>,
    /// Optional status filter.
    pub status: Option<ExecutionStatus>,
    /// Page size.
    pub limit: usize,
    /// Row offset.
    pub offset: usize,
}
