use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Action reference accepted by execution creation: a `pack.name` string,
/// an `{ id }` object, or a `{ name, pack? }` object.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(untagged)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/action-reference-dto.ts"
)]
pub enum ActionReferenceDto {
    Ref(String),
    Id {
        id: String,
    },
    Name {
        name: String,
        pack: Option<String>,
    },
}

/// Incoming payload for execution creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-execution-request.ts"
)]
pub struct CreateExecutionRequest {
    pub action: ActionReferenceDto,
    #[ts(type = "Record<string, unknown> | null")]
    pub parameters: Option<Map<String, Value>>,
}

/// Incoming payload for a partial execution update.
///
/// An explicit `"result": null` clears the stored result; an absent `result`
/// leaves it untouched.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-execution-request.ts"
)]
pub struct UpdateExecutionRequest {
    pub status: Option<String>,
    #[serde(default, deserialize_with = "present_value")]
    #[ts(type = "unknown")]
    pub result: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Query string accepted by the execution listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ExecutionListQueryRequest {
    pub action_id: Option<String>,
    pub action_name: Option<String>,
    pub status: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Denormalized action descriptor stored on an execution.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/execution-action-response.ts"
)]
pub struct ExecutionActionResponse {
    pub id: String,
    pub name: String,
    pub pack: String,
}

/// API representation of one action execution.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/execution-response.ts"
)]
pub struct ExecutionResponse {
    pub id: String,
    pub action: ExecutionActionResponse,
    #[ts(type = "Record<string, unknown>")]
    pub parameters: Map<String, Value>,
    pub status: String,
    #[ts(type = "unknown")]
    pub result: Value,
    #[ts(type = "Record<string, unknown>")]
    pub context: Map<String, Value>,
    pub start_timestamp: String,
}
