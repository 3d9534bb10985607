use async_trait::async_trait;
use sqlx::PgPool;

use stackrun_application::{AuditEvent, AuditRepository};
use stackrun_core::{AppError, AppResult};
use tracing::warn;

/// PostgreSQL-backed append-only audit log. Execution events also fill the
/// `execution_id` column so an execution's history can be read by index.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        let execution_id = execution_uuid(&event);

        sqlx::query(
            r#"
            INSERT INTO audit_log_entries (
                subject,
                action,
                resource_type,
                resource_id,
                execution_id,
                detail
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(event.subject.as_str())
        .bind(event.action.as_str())
        .bind(event.resource_type.as_str())
        .bind(event.resource_id.as_str())
        .bind(execution_id)
        .bind(event.detail.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to append audit event '{}' for {} '{}': {error}",
                event.action.as_str(),
                event.resource_type,
                event.resource_id
            ))
        })?;

        Ok(())
    }
}

fn execution_uuid(event: &AuditEvent) -> Option<uuid::Uuid> {
    let execution_id = event.execution_id()?;
    match uuid::Uuid::parse_str(execution_id) {
        Ok(id) => Some(id),
        Err(error) => {
            warn!(
                execution_id,
                %error,
                "audit event references an execution id that is not a UUID"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use stackrun_application::{AuditEvent, EXECUTION_RESOURCE_TYPE};
    use stackrun_domain::AuditAction;

    use super::execution_uuid;

    #[test]
    fn execution_events_carry_a_uuid() {
        let id = uuid::Uuid::new_v4();
        let event = AuditEvent::execution(
            "system".to_owned(),
            AuditAction::ExecutionCreated,
            id.to_string().as_str(),
            "created".to_owned(),
        );

        assert_eq!(execution_uuid(&event), Some(id));
    }

    #[test]
    fn other_resources_and_malformed_ids_have_no_execution_uuid() {
        let registry_event = AuditEvent {
            subject: "system".to_owned(),
            action: AuditAction::ActionSaved,
            resource_type: "action".to_owned(),
            resource_id: uuid::Uuid::new_v4().to_string(),
            detail: None,
        };
        assert_eq!(execution_uuid(&registry_event), None);

        let malformed = AuditEvent {
            resource_type: EXECUTION_RESOURCE_TYPE.to_owned(),
            resource_id: "e-1".to_owned(),
            ..registry_event
        };
        assert_eq!(execution_uuid(&malformed), None);
    }
}
