use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use stackrun_application::CreateExecutionInput;
use tracing::warn;

use crate::dto::{
    CreateExecutionRequest, ExecutionListQueryRequest, ExecutionResponse, UpdateExecutionRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

/// Header carrying the caller's correlation context as a JSON object.
pub const CONTEXT_HEADER: &str = "st2-context";

pub async fn get_execution_handler(
    State(state): State<AppState>,
    Path(execution_id): Path<String>,
) -> ApiResult<Json<ExecutionResponse>> {
    let execution = state
        .execution_service
        .get_execution(execution_id.as_str())
        .await?;

    Ok(Json(ExecutionResponse::from(execution)))
}

pub async fn list_executions_handler(
    State(state): State<AppState>,
    Query(query): Query<ExecutionListQueryRequest>,
) -> ApiResult<Json<Vec<ExecutionResponse>>> {
    let executions = state
        .execution_service
        .list_executions(query.try_into()?)
        .await?
        .into_iter()
        .map(ExecutionResponse::from)
        .collect();

    Ok(Json(executions))
}

pub async fn create_execution_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateExecutionRequest>,
) -> ApiResult<(StatusCode, Json<ExecutionResponse>)> {
    let execution = state
        .execution_service
        .create_execution(CreateExecutionInput {
            action: payload.action.into(),
            parameters: payload.parameters,
            context_header: context_header(&headers),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ExecutionResponse::from(execution))))
}

pub async fn update_execution_handler(
    State(state): State<AppState>,
    Path(execution_id): Path<String>,
    Json(payload): Json<UpdateExecutionRequest>,
) -> ApiResult<Json<ExecutionResponse>> {
    let execution = state
        .execution_service
        .update_execution(execution_id.as_str(), payload.try_into()?)
        .await?;

    Ok(Json(ExecutionResponse::from(execution)))
}

fn context_header(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTEXT_HEADER)?;
    match std::str::from_utf8(value.as_bytes()) {
        Ok(raw) => Some(raw.to_owned()),
        Err(error) => {
            warn!(%error, "ignoring {CONTEXT_HEADER} header that is not valid UTF-8");
            None
        }
    }
}
