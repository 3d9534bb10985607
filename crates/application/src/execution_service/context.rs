use serde_json::{Map, Value};
use tracing::warn;

/// Parses a correlation context header.
///
/// The header must hold a JSON object. Blank values yield `None`; malformed
/// values are logged and yield `None` so that they never fail a request.
#[must_use]
pub fn parse_context_header(raw: &str) -> Option<Map<String, Value>> {
    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(context)) => Some(context),
        Ok(other) => {
            warn!(
                value_type = json_type_name(&other),
                "ignoring execution context header that is not a JSON object"
            );
            None
        }
        Err(error) => {
            warn!(error = %error, "ignoring malformed execution context header");
            None
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
