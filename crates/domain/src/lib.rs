//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod action;
mod audit;
mod execution;
mod parameter_schema;
mod runner;

pub use action::{ActionDefinition, ActionDefinitionInput, ActionReference, ExecutionActionRef};
pub use audit::AuditAction;
pub use execution::ExecutionStatus;
pub use parameter_schema::{apply_runner_defaults, build_parameter_schema};
pub use runner::{RunnerType, RunnerTypeInput};
