use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use stackrun_application::ActionRegistry;
use stackrun_core::{AppError, AppResult};
use stackrun_domain::{
    ActionDefinition, ActionDefinitionInput, ActionReference, RunnerType, RunnerTypeInput,
};

/// PostgreSQL-backed registry of action definitions and runner types.
#[derive(Clone)]
pub struct PostgresActionRegistry {
    pool: PgPool,
}

impl PostgresActionRegistry {
    /// Creates a registry with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActionDefinitionRow {
    id: String,
    name: String,
    pack: String,
    description: Option<String>,
    enabled: bool,
    runner_type: String,
    parameters: Value,
    required_parameters: Value,
}

#[derive(Debug, FromRow)]
struct RunnerTypeRow {
    name: String,
    description: Option<String>,
    enabled: bool,
    runner_parameters: Value,
    required_parameters: Value,
}

const ACTION_COLUMNS: &str = r#"
    id,
    name,
    pack,
    description,
    enabled,
    runner_type,
    parameters,
    required_parameters
"#;

#[async_trait]
impl ActionRegistry for PostgresActionRegistry {
    async fn resolve_action(
        &self,
        reference: &ActionReference,
    ) -> AppResult<Option<ActionDefinition>> {
        let row = match reference {
            ActionReference::Id(id) => {
                sqlx::query_as::<_, ActionDefinitionRow>(&format!(
                    "SELECT {ACTION_COLUMNS} FROM action_definitions WHERE id = $1"
                ))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
            }
            ActionReference::Name { name, pack } => {
                sqlx::query_as::<_, ActionDefinitionRow>(&format!(
                    r#"
                    SELECT {ACTION_COLUMNS}
                    FROM action_definitions
                    WHERE name = $1
                      AND ($2::TEXT IS NULL OR pack = $2)
                    ORDER BY pack
                    LIMIT 1
                    "#
                ))
                .bind(name)
                .bind(pack.as_deref())
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(|error| {
            AppError::Internal(format!("failed to resolve action {reference}: {error}"))
        })?;

        row.map(action_definition_from_row).transpose()
    }

    async fn find_runner_type(&self, name: &str) -> AppResult<Option<RunnerType>> {
        let row = sqlx::query_as::<_, RunnerTypeRow>(
            r#"
            SELECT
                name,
                description,
                enabled,
                runner_parameters,
                required_parameters
            FROM runner_types
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load runner type '{name}': {error}"))
        })?;

        row.map(runner_type_from_row).transpose()
    }

    async fn list_actions(&self) -> AppResult<Vec<ActionDefinition>> {
        let rows = sqlx::query_as::<_, ActionDefinitionRow>(&format!(
            "SELECT {ACTION_COLUMNS} FROM action_definitions ORDER BY pack, name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list actions: {error}")))?;

        rows.into_iter().map(action_definition_from_row).collect()
    }

    async fn save_action(&self, action: ActionDefinition) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO action_definitions (
                id,
                name,
                pack,
                description,
                enabled,
                runner_type,
                parameters,
                required_parameters,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now())
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                pack = EXCLUDED.pack,
                description = EXCLUDED.description,
                enabled = EXCLUDED.enabled,
                runner_type = EXCLUDED.runner_type,
                parameters = EXCLUDED.parameters,
                required_parameters = EXCLUDED.required_parameters,
                updated_at = now()
            "#,
        )
        .bind(action.id().as_str())
        .bind(action.name().as_str())
        .bind(action.pack().as_str())
        .bind(action.description())
        .bind(action.enabled())
        .bind(action.runner_type().as_str())
        .bind(parameter_json(action.parameters()))
        .bind(Value::from(action.required_parameters().to_vec()))
        .execute(&self.pool)
        .await
        .map_err(|error| {
            let is_duplicate = error
                .as_database_error()
                .is_some_and(|database_error| database_error.is_unique_violation());
            if is_duplicate {
                return AppError::Validation(format!(
                    "action '{}' is already registered under another id",
                    action.ref_name()
                ));
            }

            AppError::Internal(format!(
                "failed to save action '{}': {error}",
                action.ref_name()
            ))
        })?;

        Ok(())
    }

    async fn save_runner_type(&self, runner_type: RunnerType) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO runner_types (
                name,
                description,
                enabled,
                runner_parameters,
                required_parameters,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, now())
            ON CONFLICT (name)
            DO UPDATE SET
                description = EXCLUDED.description,
                enabled = EXCLUDED.enabled,
                runner_parameters = EXCLUDED.runner_parameters,
                required_parameters = EXCLUDED.required_parameters,
                updated_at = now()
            "#,
        )
        .bind(runner_type.name().as_str())
        .bind(runner_type.description())
        .bind(runner_type.enabled())
        .bind(parameter_json(runner_type.runner_parameters()))
        .bind(Value::from(runner_type.required_parameters().to_vec()))
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save runner type '{}': {error}",
                runner_type.name().as_str()
            ))
        })?;

        Ok(())
    }
}

fn action_definition_from_row(row: ActionDefinitionRow) -> AppResult<ActionDefinition> {
    ActionDefinition::new(ActionDefinitionInput {
        parameters: parameter_map(row.parameters, "action parameters")?,
        required_parameters: name_list(row.required_parameters, "action required parameters")?,
        id: row.id,
        name: row.name,
        pack: row.pack,
        description: row.description,
        enabled: row.enabled,
        runner_type: row.runner_type,
    })
}

fn runner_type_from_row(row: RunnerTypeRow) -> AppResult<RunnerType> {
    RunnerType::new(RunnerTypeInput {
        runner_parameters: parameter_map(row.runner_parameters, "runner parameters")?,
        required_parameters: name_list(row.required_parameters, "runner required parameters")?,
        name: row.name,
        description: row.description,
        enabled: row.enabled,
    })
}

fn parameter_map(value: Value, label: &str) -> AppResult<BTreeMap<String, Value>> {
    serde_json::from_value(value)
        .map_err(|error| AppError::Internal(format!("invalid stored {label}: {error}")))
}

fn name_list(value: Value, label: &str) -> AppResult<Vec<String>> {
    serde_json::from_value(value)
        .map_err(|error| AppError::Internal(format!("invalid stored {label}: {error}")))
}

fn parameter_json(parameters: &BTreeMap<String, Value>) -> Value {
    Value::Object(
        parameters
            .iter()
            .map(|(name, schema)| (name.clone(), schema.clone()))
            .collect(),
    )
}
