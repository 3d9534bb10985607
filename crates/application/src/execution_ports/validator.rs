use serde_json::{Map, Value};
use stackrun_core::AppResult;

/// Validates execution parameters against a JSON schema.
pub trait ParameterValidator: Send + Sync {
    /// Returns `AppError::Validation` carrying the validator message when the
    /// parameters do not satisfy the schema.
    fn validate(&self, parameters: &Map<String, Value>, schema: &Value) -> AppResult<()>;
}
