mod records;
mod registry;
mod repository;
mod validator;

pub use records::{ActionExecution, CreateExecutionInput, ExecutionListQuery, UpdateExecutionInput};
pub use registry::ActionRegistry;
pub use repository::ExecutionRepository;
pub use validator::ParameterValidator;
