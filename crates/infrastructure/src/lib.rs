//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_action_registry;
mod in_memory_execution_repository;
mod json_schema_parameter_validator;
mod postgres_action_registry;
mod postgres_audit_repository;
mod postgres_execution_repository;
mod tracing_audit_repository;

pub use in_memory_action_registry::InMemoryActionRegistry;
pub use in_memory_execution_repository::InMemoryExecutionRepository;
pub use json_schema_parameter_validator::JsonSchemaParameterValidator;
pub use postgres_action_registry::PostgresActionRegistry;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_execution_repository::PostgresExecutionRepository;
pub use tracing_audit_repository::TracingAuditRepository;
