use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{ActionResponse, RunnerTypeResponse, SaveActionRequest, SaveRunnerTypeRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn save_runner_type_handler(
    State(state): State<AppState>,
    Path(runner_type_name): Path<String>,
    Json(payload): Json<SaveRunnerTypeRequest>,
) -> ApiResult<Json<RunnerTypeResponse>> {
    let runner_type = state
        .action_catalog_service
        .save_runner_type(payload.into_input(runner_type_name))
        .await?;

    Ok(Json(RunnerTypeResponse::from(runner_type)))
}

pub async fn save_action_handler(
    State(state): State<AppState>,
    Path(action_id): Path<String>,
    Json(payload): Json<SaveActionRequest>,
) -> ApiResult<Json<ActionResponse>> {
    let action = state
        .action_catalog_service
        .save_action(payload.into_input(action_id))
        .await?;

    Ok(Json(ActionResponse::from(action)))
}

pub async fn list_actions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ActionResponse>>> {
    let actions = state
        .action_catalog_service
        .list_actions()
        .await?
        .into_iter()
        .map(ActionResponse::from)
        .collect();

    Ok(Json(actions))
}
