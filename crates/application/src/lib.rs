//! Application services and ports.

#![forbid(unsafe_code)]

mod action_catalog_service;
mod audit_ports;
mod execution_ports;
mod execution_service;

pub use action_catalog_service::{ActionCatalogService, SaveActionInput, SaveRunnerTypeInput};
pub use audit_ports::{AuditEvent, AuditRepository, EXECUTION_RESOURCE_TYPE};
pub use execution_ports::{
    ActionExecution, ActionRegistry, CreateExecutionInput, ExecutionListQuery,
    ExecutionRepository, ParameterValidator, UpdateExecutionInput,
};
pub use execution_service::{
    DEFAULT_LIST_LIMIT, ExecutionService, MAX_LIST_LIMIT, parse_context_header,
};

#[cfg(test)]
mod test_support;
