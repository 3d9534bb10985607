mod conversions;
mod types;

pub use types::{
    ActionReferenceDto, CreateExecutionRequest, ExecutionListQueryRequest, ExecutionResponse,
    UpdateExecutionRequest,
};
