use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Incoming payload for runner type registration.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-runner-type-request.ts"
)]
pub struct SaveRunnerTypeRequest {
    pub description: Option<String>,
    pub enabled: Option<bool>,
    #[ts(type = "Record<string, unknown> | null")]
    pub runner_parameters: Option<BTreeMap<String, Value>>,
    pub required_parameters: Option<Vec<String>>,
}

/// Incoming payload for action registration.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-action-request.ts"
)]
pub struct SaveActionRequest {
    pub name: String,
    pub pack: String,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub runner_type: String,
    #[ts(type = "Record<string, unknown> | null")]
    pub parameters: Option<BTreeMap<String, Value>>,
    pub required_parameters: Option<Vec<String>>,
}

/// API representation of one runner type.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/runner-type-response.ts"
)]
pub struct RunnerTypeResponse {
    pub name: String,
    pub description: Option<String>,
    pub enabled: bool,
    #[ts(type = "Record<string, unknown>")]
    pub runner_parameters: BTreeMap<String, Value>,
    pub required_parameters: Vec<String>,
}

/// API representation of one action definition.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/action-response.ts"
)]
pub struct ActionResponse {
    pub id: String,
    pub name: String,
    pub pack: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub description: Option<String>,
    pub enabled: bool,
    pub runner_type: String,
    #[ts(type = "Record<string, unknown>")]
    pub parameters: BTreeMap<String, Value>,
    pub required_parameters: Vec<String>,
}
