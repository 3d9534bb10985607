use super::*;

impl ExecutionService {
    /// Creates an execution for an enabled action and hands it to the
    /// scheduler.
    ///
    /// Nothing is persisted when the action cannot be resolved, is disabled,
    /// or when the merged parameters fail schema validation. The returned
    /// record carries status `scheduled`.
    pub async fn create_execution(
        &self,
        input: CreateExecutionInput,
    ) -> AppResult<ActionExecution> {
        let CreateExecutionInput {
            action: reference,
            parameters,
            context_header,
        } = input;
        info!(action = %reference, "creating action execution");

        let start_timestamp = Utc::now();
        let context = context_header
            .as_deref()
            .and_then(parse_context_header)
            .unwrap_or_default();

        let mut parameters = parameters.unwrap_or_else(|| {
            warn!(action = %reference, "execution request did not provide parameters");
            Map::new()
        });

        let action = if reference.is_blank() {
            None
        } else {
            self.action_registry.resolve_action(&reference).await?
        };
        let Some(action) = action else {
            error!(action = %reference, "action for execution request cannot be found");
            return Err(AppError::NotFound("Unable to find action.".to_owned()));
        };
        debug!(action = %action.ref_name(), "resolved execution action");

        if !action.enabled() {
            error!(
                action = %action.ref_name(),
                "unable to create execution for a disabled action"
            );
            return Err(AppError::Forbidden("Action is disabled.".to_owned()));
        }

        let runner_type = self
            .action_registry
            .find_runner_type(action.runner_type().as_str())
            .await?
            .ok_or_else(|| {
                error!(
                    action = %action.ref_name(),
                    runner_type = %action.runner_type().as_str(),
                    "runner type for action cannot be found"
                );
                AppError::NotFound(format!(
                    "Unable to find runner type '{}'.",
                    action.runner_type().as_str()
                ))
            })?;

        let injected = apply_runner_defaults(&mut parameters, &runner_type);
        debug!(
            runner_type = %runner_type.name().as_str(),
            defaults = ?injected,
            "applied runner parameter defaults"
        );

        let schema = build_parameter_schema(&action, &runner_type);
        if let Err(validation_error) = self.parameter_validator.validate(&parameters, &schema) {
            error!(
                action = %action.ref_name(),
                error = %validation_error,
                "execution parameter validation failed"
            );
            return Err(validation_error);
        }

        let created = self
            .repository
            .save_execution(ActionExecution {
                execution_id: uuid::Uuid::new_v4().to_string(),
                action: action.execution_ref(),
                parameters,
                status: ExecutionStatus::Init,
                result: Value::Null,
                context,
                start_timestamp,
            })
            .await?;

        self.audit_repository
            .append_event(AuditEvent::execution(
                audit_subject(&created.context),
                AuditAction::ExecutionCreated,
                created.execution_id.as_str(),
                format!(
                    "created execution of action '{}' with status '{}'",
                    action.ref_name(),
                    created.status
                ),
            ))
            .await?;
        info!(
            execution_id = %created.execution_id,
            action = %action.ref_name(),
            "action execution created"
        );

        let scheduled = self
            .repository
            .update_execution_status(created.execution_id.as_str(), ExecutionStatus::Scheduled)
            .await?;
        debug!(
            execution_id = %scheduled.execution_id,
            status = %scheduled.status,
            "action execution scheduled"
        );

        Ok(scheduled)
    }
}
