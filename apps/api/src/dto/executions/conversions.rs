use stackrun_application::{
    ActionExecution, DEFAULT_LIST_LIMIT, ExecutionListQuery, UpdateExecutionInput,
};
use stackrun_core::AppError;
use stackrun_domain::{ActionReference, ExecutionStatus};

use super::types::{
    ActionReferenceDto, ExecutionActionResponse, ExecutionListQueryRequest, ExecutionResponse,
    UpdateExecutionRequest,
};

impl From<ActionReferenceDto> for ActionReference {
    fn from(value: ActionReferenceDto) -> Self {
        match value {
            ActionReferenceDto::Ref(reference) => Self::from_ref(reference.as_str()),
            ActionReferenceDto::Id { id } => Self::Id(id),
            ActionReferenceDto::Name { name, pack } => Self::Name { name, pack },
        }
    }
}

impl TryFrom<UpdateExecutionRequest> for UpdateExecutionInput {
    type Error = AppError;

    fn try_from(value: UpdateExecutionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            status: value
                .status
                .as_deref()
                .map(ExecutionStatus::from_transport)
                .transpose()?,
            result: value.result,
        })
    }
}

impl TryFrom<ExecutionListQueryRequest> for ExecutionListQuery {
    type Error = AppError;

    fn try_from(value: ExecutionListQueryRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            action_id: value.action_id.filter(|action_id| !action_id.is_empty()),
            action_name: value.action_name.filter(|action_name| !action_name.is_empty()),
            status: value
                .status
                .as_deref()
                .map(ExecutionStatus::from_transport)
                .transpose()?,
            limit: value.limit.unwrap_or(DEFAULT_LIST_LIMIT),
            offset: value.offset.unwrap_or(0),
        })
    }
}

impl From<ActionExecution> for ExecutionResponse {
    fn from(value: ActionExecution) -> Self {
        Self {
            id: value.execution_id,
            action: ExecutionActionResponse {
                id: value.action.id,
                name: value.action.name,
                pack: value.action.pack,
            },
            parameters: value.parameters,
            status: value.status.as_str().to_owned(),
            result: value.result,
            context: value.context,
            start_timestamp: value.start_timestamp.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use stackrun_application::{ExecutionListQuery, UpdateExecutionInput};
    use serde_json::Value;
    use stackrun_domain::{ActionReference, ExecutionStatus};

    use super::super::types::{
        ActionReferenceDto, CreateExecutionRequest, ExecutionListQueryRequest,
        UpdateExecutionRequest,
    };

    fn reference_from_json(payload: &str) -> Option<ActionReference> {
        serde_json::from_str::<CreateExecutionRequest>(payload)
            .ok()
            .map(|request| ActionReference::from(request.action))
    }

    #[test]
    fn action_reference_accepts_string_and_object_shapes() {
        assert_eq!(
            reference_from_json(r#"{"action": "core.local"}"#),
            Some(ActionReference::Name {
                name: "local".to_owned(),
                pack: Some("core".to_owned()),
            })
        );
        assert_eq!(
            reference_from_json(r#"{"action": {"id": "a-1", "name": "ignored"}}"#),
            Some(ActionReference::Id("a-1".to_owned()))
        );
        assert_eq!(
            reference_from_json(r#"{"action": {"name": "local"}}"#),
            Some(ActionReference::Name {
                name: "local".to_owned(),
                pack: None,
            })
        );
    }

    #[test]
    fn create_request_without_parameters_keeps_them_absent() {
        let request = serde_json::from_str::<CreateExecutionRequest>(r#"{"action": "core.local"}"#);
        assert!(matches!(
            request,
            Ok(CreateExecutionRequest {
                action: ActionReferenceDto::Ref(_),
                parameters: None,
            })
        ));
    }

    #[test]
    fn update_request_parses_status() {
        let input = UpdateExecutionInput::try_from(UpdateExecutionRequest {
            status: Some("succeeded".to_owned()),
            result: None,
        });
        assert_eq!(
            input.ok(),
            Some(UpdateExecutionInput {
                status: Some(ExecutionStatus::Succeeded),
                result: None,
            })
        );

        let invalid = UpdateExecutionInput::try_from(UpdateExecutionRequest {
            status: Some("paused".to_owned()),
            result: None,
        });
        assert!(invalid.is_err());
    }

    #[test]
    fn list_query_applies_defaults() {
        let query = ExecutionListQuery::try_from(ExecutionListQueryRequest {
            action_id: Some(String::new()),
            ..ExecutionListQueryRequest::default()
        });
        assert_eq!(
            query.ok(),
            Some(ExecutionListQuery {
                action_id: None,
                action_name: None,
                status: None,
                limit: 50,
                offset: 0,
            })
        );
    }

    #[test]
    fn update_request_distinguishes_null_result_from_absent_result() {
        let cleared = serde_json::from_str::<UpdateExecutionRequest>(r#"{"result": null}"#)
            .map_err(|error| error.to_string())
            .and_then(|request| {
                UpdateExecutionInput::try_from(request).map_err(|error| error.to_string())
            });
        assert_eq!(
            cleared.ok(),
            Some(UpdateExecutionInput {
                status: None,
                result: Some(Value::Null),
            })
        );

        let untouched = serde_json::from_str::<UpdateExecutionRequest>(r#"{"status": "failed"}"#)
            .map_err(|error| error.to_string())
            .and_then(|request| {
                UpdateExecutionInput::try_from(request).map_err(|error| error.to_string())
            });
        assert_eq!(
            untouched.ok(),
            Some(UpdateExecutionInput {
                status: Some(ExecutionStatus::Failed),
                result: None,
            })
        );
    }
}
