use jsonschema::JSONSchema;
use serde_json::{Map, Value};

use stackrun_application::ParameterValidator;
use stackrun_core::{AppError, AppResult};

/// Parameter validator backed by the `jsonschema` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaParameterValidator;

impl JsonSchemaParameterValidator {
    /// Creates a validator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ParameterValidator for JsonSchemaParameterValidator {
    fn validate(&self, parameters: &Map<String, Value>, schema: &Value) -> AppResult<()> {
        let compiled = JSONSchema::compile(schema).map_err(|error| {
            AppError::Internal(format!("invalid action parameter schema: {error}"))
        })?;

        let instance = Value::Object(parameters.clone());
        if let Err(errors) = compiled.validate(&instance) {
            let message = errors
                .into_iter()
                .next()
                .map(|error| error.to_string())
                .unwrap_or_else(|| "parameters do not match the action schema".to_owned());
            return Err(AppError::Validation(message));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};
    use stackrun_application::ParameterValidator;
    use stackrun_core::AppError;

    use super::JsonSchemaParameterValidator;

    fn schema() -> Value {
        json!({
            "title": "echo",
            "type": "object",
            "properties": {
                "message": {"type": "string"},
                "count": {"type": "integer", "default": 1},
            },
            "required": ["message"],
            "additionalProperties": false,
        })
    }

    fn parameters(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn matching_parameters_pass() {
        let result = JsonSchemaParameterValidator::new()
            .validate(&parameters(json!({"message": "hi", "count": 2})), &schema());
        assert!(result.is_ok());
    }

    #[test]
    fn missing_required_parameter_is_reported() {
        let result =
            JsonSchemaParameterValidator::new().validate(&parameters(json!({"count": 2})), &schema());
        assert!(matches!(result, Err(AppError::Validation(message)) if message.contains("message")));
    }

    #[test]
    fn wrong_type_is_reported() {
        let result = JsonSchemaParameterValidator::new().validate(
            &parameters(json!({"message": "hi", "count": "two"})),
            &schema(),
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn unknown_parameter_is_reported() {
        let result = JsonSchemaParameterValidator::new().validate(
            &parameters(json!({"message": "hi", "color": "red"})),
            &schema(),
        );
        assert!(matches!(result, Err(AppError::Validation(message)) if message.contains("color")));
    }

    #[test]
    fn empty_schema_accepts_anything() {
        let result = JsonSchemaParameterValidator::new()
            .validate(&parameters(json!({"anything": [1, 2, 3]})), &json!({}));
        assert!(result.is_ok());
    }
}
