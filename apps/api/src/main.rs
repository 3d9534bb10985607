//! Stackrun execution gateway composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use stackrun_application::{
    ActionCatalogService, ActionRegistry, AuditRepository, ExecutionRepository, ExecutionService,
};
use stackrun_core::AppError;
use stackrun_infrastructure::{
    InMemoryActionRegistry, InMemoryExecutionRepository, JsonSchemaParameterValidator,
    PostgresActionRegistry, PostgresAuditRepository, PostgresExecutionRepository,
    TracingAuditRepository,
};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

struct Adapters {
    execution_repository: Arc<dyn ExecutionRepository>,
    action_registry: Arc<dyn ActionRegistry>,
    audit_repository: Arc<dyn AuditRepository>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let adapters = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to connect to database: {error}"))
                })?;

            sqlx::migrate!("../../crates/infrastructure/migrations")
                .run(&pool)
                .await
                .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

            if config.migrate_only {
                info!("database migrations applied successfully");
                return Ok(());
            }

            Adapters {
                execution_repository: Arc::new(PostgresExecutionRepository::new(pool.clone())),
                action_registry: Arc::new(PostgresActionRegistry::new(pool.clone())),
                audit_repository: Arc::new(PostgresAuditRepository::new(pool)),
            }
        }
        None => {
            warn!("DATABASE_URL is not set; executions are kept in memory");
            Adapters {
                execution_repository: Arc::new(InMemoryExecutionRepository::new()),
                action_registry: Arc::new(InMemoryActionRegistry::new()),
                audit_repository: Arc::new(TracingAuditRepository::new()),
            }
        }
    };

    let app_state = AppState {
        execution_service: ExecutionService::new(
            adapters.execution_repository,
            adapters.action_registry.clone(),
            Arc::new(JsonSchemaParameterValidator::new()),
            adapters.audit_repository.clone(),
        ),
        action_catalog_service: ActionCatalogService::new(
            adapters.action_registry,
            adapters.audit_repository,
        ),
    };

    let app = api_router::build_router(app_state, config.frontend_url.as_str())?;
    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "stackrun-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
