mod actions;
mod executions;

use serde::Serialize;
use ts_rs::TS;

pub use actions::{ActionResponse, RunnerTypeResponse, SaveActionRequest, SaveRunnerTypeRequest};
pub use executions::{
    ActionReferenceDto, CreateExecutionRequest, ExecutionListQueryRequest, ExecutionResponse,
    UpdateExecutionRequest,
};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}
