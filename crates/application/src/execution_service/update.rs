use super::*;

impl ExecutionService {
    /// Overwrites the status and/or result of a stored execution.
    ///
    /// Status changes are not checked against the lifecycle: callers are
    /// trusted internal components such as the execution engine.
    pub async fn update_execution(
        &self,
        execution_id: &str,
        input: UpdateExecutionInput,
    ) -> AppResult<ActionExecution> {
        let mut execution = self.get_execution(execution_id).await?;

        let mut changed = Vec::new();
        if let Some(status) = input.status
            && status != execution.status
        {
            debug!(
                execution_id = %execution_id,
                from = %execution.status,
                to = %status,
                "overwriting execution status"
            );
            execution.status = status;
            changed.push("status");
        }
        if let Some(result) = input.result
            && result != execution.result
        {
            execution.result = result;
            changed.push("result");
        }

        let updated = self.repository.save_execution(execution).await?;

        if !changed.is_empty() {
            self.audit_repository
                .append_event(AuditEvent::execution(
                    audit_subject(&updated.context),
                    AuditAction::ExecutionUpdated,
                    updated.execution_id.as_str(),
                    format!(
                        "updated {} of execution; status is '{}'",
                        changed.join(" and "),
                        updated.status
                    ),
                ))
                .await?;
        }

        info!(
            execution_id = %updated.execution_id,
            status = %updated.status,
            changed = ?changed,
            "action execution updated"
        );
        Ok(updated)
    }
}
