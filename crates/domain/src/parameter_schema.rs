use std::collections::BTreeSet;

use serde_json::{Map, Value, json};

use crate::{ActionDefinition, RunnerType};

/// Injects runner defaults for parameters the caller did not supply.
///
/// Caller values always win, and defaults declared as `null` are never
/// injected. Returns the names of injected parameters in runner order.
pub fn apply_runner_defaults(parameters: &mut Map<String, Value>, runner: &RunnerType) -> Vec<String> {
    let mut injected = Vec::new();
    for (name, default) in runner.parameter_defaults() {
        if !parameters.contains_key(name) {
            parameters.insert(name.to_owned(), default.clone());
            injected.push(name.to_owned());
        }
    }

    injected
}

/// Builds the JSON schema that execution parameters must satisfy.
///
/// Action parameter metadata overrides runner metadata of the same name. Empty
/// or null metadata accepts any value. With no declared parameters the schema
/// is empty and accepts every payload.
#[must_use]
pub fn build_parameter_schema(action: &ActionDefinition, runner: &RunnerType) -> Value {
    let mut properties = Map::new();
    for (name, metadata) in runner
        .runner_parameters()
        .iter()
        .chain(action.parameters().iter())
    {
        properties.insert(name.clone(), normalize_metadata(metadata));
    }

    if properties.is_empty() {
        return json!({});
    }

    let required: BTreeSet<&str> = runner
        .required_parameters()
        .iter()
        .chain(action.required_parameters().iter())
        .map(String::as_str)
        .collect();

    let mut schema = Map::new();
    schema.insert("title".to_owned(), json!(action.name().as_str()));
    if let Some(description) = action.description() {
        schema.insert("description".to_owned(), json!(description));
    }
    schema.insert("type".to_owned(), json!("object"));
    schema.insert("properties".to_owned(), Value::Object(properties));
    schema.insert("required".to_owned(), json!(required));
    schema.insert("additionalProperties".to_owned(), json!(false));

    Value::Object(schema)
}

fn normalize_metadata(metadata: &Value) -> Value {
    match metadata {
        Value::Object(fields) if !fields.is_empty() => metadata.clone(),
        _ => json!({}),
    }
}
