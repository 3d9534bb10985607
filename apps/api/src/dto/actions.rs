mod conversions;
mod types;

pub use types::{ActionResponse, RunnerTypeResponse, SaveActionRequest, SaveRunnerTypeRequest};
