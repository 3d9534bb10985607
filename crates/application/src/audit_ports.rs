use async_trait::async_trait;
use stackrun_core::AppResult;
use stackrun_domain::AuditAction;

/// Resource type recorded on audit events about action executions.
pub const EXECUTION_RESOURCE_TYPE: &str = "action_execution";

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Subject that performed the action.
    pub subject: String,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

impl AuditEvent {
    /// Builds an event describing a change to one action execution.
    #[must_use]
    pub fn execution(
        subject: String,
        action: AuditAction,
        execution_id: &str,
        detail: String,
    ) -> Self {
        Self {
            subject,
            action,
            resource_type: EXECUTION_RESOURCE_TYPE.to_owned(),
            resource_id: execution_id.to_owned(),
            detail: Some(detail),
        }
    }

    /// Returns the execution this event concerns, if any.
    #[must_use]
    pub fn execution_id(&self) -> Option<&str> {
        (self.resource_type == EXECUTION_RESOURCE_TYPE).then_some(self.resource_id.as_str())
    }
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
