use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stackrun_core::{AppError, AppResult, NonEmptyString};

/// Runner type describing how actions execute and which runner-level
/// parameters they accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerType {
    name: NonEmptyString,
    description: Option<String>,
    enabled: bool,
    runner_parameters: BTreeMap<String, Value>,
    required_parameters: Vec<String>,
}

/// Input payload used to construct a validated runner type.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerTypeInput {
    /// Unique runner type name.
    pub name: String,
    /// Optional runner description.
    pub description: Option<String>,
    /// Enabled/disabled flag.
    pub enabled: bool,
    /// Runner parameter metadata keyed by parameter name.
    pub runner_parameters: BTreeMap<String, Value>,
    /// Runner parameters every execution must carry.
    pub required_parameters: Vec<String>,
}

impl RunnerType {
    /// Creates a validated runner type.
    pub fn new(input: RunnerTypeInput) -> AppResult<Self> {
        let RunnerTypeInput {
            name,
            description,
            enabled,
            runner_parameters,
            required_parameters,
        } = input;

        validate_parameter_metadata("runner type", &runner_parameters)?;
        validate_required_names(&required_parameters)?;

        Ok(Self {
            name: NonEmptyString::new(name)?,
            description,
            enabled,
            runner_parameters,
            required_parameters,
        })
    }

    /// Returns the runner type name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the runner type is enabled.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns runner parameter metadata keyed by name.
    #[must_use]
    pub fn runner_parameters(&self) -> &BTreeMap<String, Value> {
        &self.runner_parameters
    }

    /// Returns required runner parameter names.
    #[must_use]
    pub fn required_parameters(&self) -> &[String] {
        &self.required_parameters
    }

    /// Iterates runner parameters that declare a non-null default value.
    pub fn parameter_defaults(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.runner_parameters
            .iter()
            .filter_map(|(name, metadata)| {
                metadata
                    .get("default")
                    .filter(|default| !default.is_null())
                    .map(|default| (name.as_str(), default))
            })
    }
}

/// Parameter metadata must be a JSON object (a schema fragment) or null.
pub(crate) fn validate_parameter_metadata(
    owner: &str,
    parameters: &BTreeMap<String, Value>,
) -> AppResult<()> {
    for (name, metadata) in parameters {
        if name.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "{owner} parameter names must not be empty"
            )));
        }

        if !(metadata.is_object() || metadata.is_null()) {
            return Err(AppError::Validation(format!(
                "{owner} parameter '{name}' metadata must be an object"
            )));
        }
    }

    Ok(())
}

pub(crate) fn validate_required_names(required: &[String]) -> AppResult<()> {
    if required.iter().any(|name| name.trim().is_empty()) {
        return Err(AppError::Validation(
            "required parameter names must not be empty".to_owned(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::{RunnerType, RunnerTypeInput};

    fn runner(parameters: BTreeMap<String, serde_json::Value>) -> RunnerTypeInput {
        RunnerTypeInput {
            name: "local-shell-cmd".to_owned(),
            description: None,
            enabled: true,
            runner_parameters: parameters,
            required_parameters: Vec::new(),
        }
    }

    #[test]
    fn parameter_defaults_skip_null_and_missing_defaults() {
        let runner_type = RunnerType::new(runner(BTreeMap::from([
            ("cmd".to_owned(), json!({"type": "string"})),
            ("sudo".to_owned(), json!({"type": "boolean", "default": false})),
            ("cwd".to_owned(), json!({"type": "string", "default": null})),
        ])));
        assert!(runner_type.is_ok());
        let runner_type = runner_type.unwrap_or_else(|_| unreachable!());

        let defaults: Vec<_> = runner_type.parameter_defaults().collect();
        assert_eq!(defaults, vec![("sudo", &json!(false))]);
    }

    #[test]
    fn scalar_parameter_metadata_is_rejected() {
        let result = RunnerType::new(runner(BTreeMap::from([(
            "cmd".to_owned(),
            json!("string"),
        )])));
        assert!(result.is_err());
    }

    #[test]
    fn blank_runner_name_is_rejected() {
        let mut input = runner(BTreeMap::new());
        input.name = " ".to_owned();
        assert!(RunnerType::new(input).is_err());
    }
}
