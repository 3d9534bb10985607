use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool};
use stackrun_application::{ActionExecution, ExecutionListQuery, ExecutionRepository};
use stackrun_core::{AppError, AppResult};
use stackrun_domain::{ExecutionActionRef, ExecutionStatus};
use tracing::debug;

/// PostgreSQL-backed execution repository storing documents in JSONB columns.
#[derive(Clone)]
pub struct PostgresExecutionRepository {
    pool: PgPool,
}

impl PostgresExecutionRepository {
    /// Creates an execution repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActionExecutionRow {
    id: uuid::Uuid,
    action_id: String,
    action_name: String,
    action_pack: String,
    parameters: Value,
    status: String,
    result: Value,
    context: Value,
    start_timestamp: DateTime<Utc>,
}

#[async_trait]
impl ExecutionRepository for PostgresExecutionRepository {
    async fn find_execution(&self, execution_id: &str) -> AppResult<Option<ActionExecution>> {
        let id = parse_execution_id(execution_id)?;

        let row = sqlx::query_as::<_, ActionExecutionRow>(
            r#"
            SELECT
                id,
                action_id,
                action_name,
                action_pack,
                parameters,
                status,
                result,
                context,
                start_timestamp
            FROM action_executions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load action execution '{execution_id}': {error}"
            ))
        })?;

        row.map(action_execution_from_row).transpose()
    }

    async fn list_executions(
        &self,
        query: &ExecutionListQuery,
    ) -> AppResult<Vec<ActionExecution>> {
        debug!(?query, "querying action executions");

        let rows = sqlx::query_as::<_, ActionExecutionRow>(
            r#"
            SELECT
                id,
                action_id,
                action_name,
                action_pack,
                parameters,
                status,
                result,
                context,
                start_timestamp
            FROM action_executions
            WHERE ($1::TEXT IS NULL OR action_id = $1)
              AND ($2::TEXT IS NULL OR action_name = $2)
              AND ($3::TEXT IS NULL OR status = $3)
            ORDER BY start_timestamp DESC, id
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(query.action_id.as_deref())
        .bind(query.action_name.as_deref())
        .bind(query.status.map(|status| status.as_str()))
        .bind(i64::try_from(query.limit).map_err(|error| {
            AppError::Validation(format!("invalid execution list limit: {error}"))
        })?)
        .bind(i64::try_from(query.offset).map_err(|error| {
            AppError::Validation(format!("invalid execution list offset: {error}"))
        })?)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list action executions: {error}")))?;

        rows.into_iter().map(action_execution_from_row).collect()
    }

    async fn save_execution(&self, execution: ActionExecution) -> AppResult<ActionExecution> {
        let id = parse_execution_id(execution.execution_id.as_str())?;

        let row = sqlx::query_as::<_, ActionExecutionRow>(
            r#"
            INSERT INTO action_executions (
                id,
                action_id,
                action_name,
                action_pack,
                parameters,
                status,
                result,
                context,
                start_timestamp
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id)
            DO UPDATE SET
                action_id = EXCLUDED.action_id,
                action_name = EXCLUDED.action_name,
                action_pack = EXCLUDED.action_pack,
                parameters = EXCLUDED.parameters,
                status = EXCLUDED.status,
                result = EXCLUDED.result,
                context = EXCLUDED.context,
                start_timestamp = EXCLUDED.start_timestamp
            RETURNING
                id,
                action_id,
                action_name,
                action_pack,
                parameters,
                status,
                result,
                context,
                start_timestamp
            "#,
        )
        .bind(id)
        .bind(execution.action.id)
        .bind(execution.action.name)
        .bind(execution.action.pack)
        .bind(Value::Object(execution.parameters))
        .bind(execution.status.as_str())
        .bind(execution.result)
        .bind(Value::Object(execution.context))
        .bind(execution.start_timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save action execution '{}': {error}",
                execution.execution_id
            ))
        })?;

        action_execution_from_row(row)
    }

    async fn update_execution_status(
        &self,
        execution_id: &str,
        status: ExecutionStatus,
    ) -> AppResult<ActionExecution> {
        let id = parse_execution_id(execution_id)?;

        let row = sqlx::query_as::<_, ActionExecutionRow>(
            r#"
            UPDATE action_executions
            SET status = $2
            WHERE id = $1
            RETURNING
                id,
                action_id,
                action_name,
                action_pack,
                parameters,
                status,
                result,
                context,
                start_timestamp
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to update status of action execution '{execution_id}': {error}"
            ))
        })?
        .ok_or_else(|| {
            AppError::NotFound(format!("action execution '{execution_id}' does not exist"))
        })?;

        action_execution_from_row(row)
    }
}

fn parse_execution_id(execution_id: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(execution_id).map_err(|error| {
        AppError::Validation(format!("invalid action execution id '{execution_id}': {error}"))
    })
}

fn action_execution_from_row(row: ActionExecutionRow) -> AppResult<ActionExecution> {
    Ok(ActionExecution {
        execution_id: row.id.to_string(),
        action: ExecutionActionRef {
            id: row.action_id,
            name: row.action_name,
            pack: row.action_pack,
        },
        parameters: json_object(row.parameters, "parameters")?,
        status: ExecutionStatus::from_transport(row.status.as_str())?,
        result: row.result,
        context: json_object(row.context, "context")?,
        start_timestamp: row.start_timestamp,
    })
}

fn json_object(value: Value, column: &str) -> AppResult<Map<String, Value>> {
    match value {
        Value::Object(fields) => Ok(fields),
        Value::Null => Ok(Map::new()),
        _ => Err(AppError::Internal(format!(
            "action execution column '{column}' does not hold a JSON object"
        ))),
    }
}
