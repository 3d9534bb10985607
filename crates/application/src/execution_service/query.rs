use super::*;

impl ExecutionService {
    /// Returns one execution by identifier.
    ///
    /// Every lookup failure, whether the record is absent, the identifier is
    /// malformed or the store errored, is reported as `NotFound`.
    pub async fn get_execution(&self, execution_id: &str) -> AppResult<ActionExecution> {
        info!(execution_id = %execution_id, "fetching action execution");

        let cause = match self.repository.find_execution(execution_id).await {
            Ok(Some(execution)) => return Ok(execution),
            Ok(None) => "no execution is stored under this id".to_owned(),
            Err(lookup_error) => lookup_error.to_string(),
        };

        let message =
            format!("Database lookup for id=\"{execution_id}\" resulted in exception. {cause}");
        error!(execution_id = %execution_id, "{message}");
        Err(AppError::NotFound(message))
    }

    /// Lists executions ordered by ascending `start_timestamp`.
    ///
    /// The page holds the `limit` most recent matches. `action_id` takes
    /// precedence over `action_name` when both are supplied.
    pub async fn list_executions(
        &self,
        query: ExecutionListQuery,
    ) -> AppResult<Vec<ActionExecution>> {
        info!(
            action_id = ?query.action_id,
            action_name = ?query.action_name,
            limit = query.limit,
            "listing action executions"
        );

        if query.limit == 0 {
            return Err(AppError::Validation(
                "execution list limit must be greater than zero".to_owned(),
            ));
        }

        let query = ExecutionListQuery {
            action_name: if query.action_id.is_some() {
                None
            } else {
                query.action_name
            },
            limit: query.limit.min(MAX_LIST_LIMIT),
            ..query
        };

        match (&query.action_id, &query.action_name) {
            (Some(action_id), _) => {
                debug!(action_id = %action_id, "filtering executions by action id");
            }
            (None, Some(action_name)) => {
                debug!(action_name = %action_name, "filtering executions by action name");
            }
            (None, None) => debug!("retrieving all action executions"),
        }

        let mut executions = self.repository.list_executions(&query).await?;
        executions.sort_by_key(|execution| execution.start_timestamp);

        debug!(count = executions.len(), "listed action executions");
        Ok(executions)
    }
}
