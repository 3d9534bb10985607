use stackrun_application::{SaveActionInput, SaveRunnerTypeInput};
use stackrun_domain::{ActionDefinition, RunnerType};

use super::types::{ActionResponse, RunnerTypeResponse, SaveActionRequest, SaveRunnerTypeRequest};

impl SaveRunnerTypeRequest {
    /// Binds the payload to the runner type name taken from the path.
    pub fn into_input(self, name: String) -> SaveRunnerTypeInput {
        SaveRunnerTypeInput {
            name,
            description: self.description,
            enabled: self.enabled.unwrap_or(true),
            runner_parameters: self.runner_parameters.unwrap_or_default(),
            required_parameters: self.required_parameters.unwrap_or_default(),
        }
    }
}

impl SaveActionRequest {
    /// Binds the payload to the action id taken from the path.
    pub fn into_input(self, id: String) -> SaveActionInput {
        SaveActionInput {
            id,
            name: self.name,
            pack: self.pack,
            description: self.description,
            enabled: self.enabled.unwrap_or(true),
            runner_type: self.runner_type,
            parameters: self.parameters.unwrap_or_default(),
            required_parameters: self.required_parameters.unwrap_or_default(),
        }
    }
}

impl From<RunnerType> for RunnerTypeResponse {
    fn from(value: RunnerType) -> Self {
        Self {
            name: value.name().as_str().to_owned(),
            description: value.description().map(ToOwned::to_owned),
            enabled: value.enabled(),
            runner_parameters: value.runner_parameters().clone(),
            required_parameters: value.required_parameters().to_vec(),
        }
    }
}

impl From<ActionDefinition> for ActionResponse {
    fn from(value: ActionDefinition) -> Self {
        Self {
            id: value.id().as_str().to_owned(),
            name: value.name().as_str().to_owned(),
            pack: value.pack().as_str().to_owned(),
            ref_name: value.ref_name(),
            description: value.description().map(ToOwned::to_owned),
            enabled: value.enabled(),
            runner_type: value.runner_type().as_str().to_owned(),
            parameters: value.parameters().clone(),
            required_parameters: value.required_parameters().to_vec(),
        }
    }
}
