use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stackrun_core::{AppResult, NonEmptyString};

use crate::runner::{validate_parameter_metadata, validate_required_names};

/// Registered action that executions can be requested for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    id: NonEmptyString,
    name: NonEmptyString,
    pack: NonEmptyString,
    description: Option<String>,
    enabled: bool,
    runner_type: NonEmptyString,
    parameters: BTreeMap<String, Value>,
    required_parameters: Vec<String>,
}

/// Input payload used to construct a validated action definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDefinitionInput {
    /// Stable action identifier.
    pub id: String,
    /// Action name, unique inside its pack.
    pub name: String,
    /// Pack that owns the action.
    pub pack: String,
    /// Optional action description.
    pub description: Option<String>,
    /// Enabled/disabled flag.
    pub enabled: bool,
    /// Name of the runner type that executes the action.
    pub runner_type: String,
    /// Action parameter metadata keyed by parameter name.
    pub parameters: BTreeMap<String, Value>,
    /// Action parameters every execution must carry.
    pub required_parameters: Vec<String>,
}

impl ActionDefinition {
    /// Creates a validated action definition.
    pub fn new(input: ActionDefinitionInput) -> AppResult<Self> {
        let ActionDefinitionInput {
            id,
            name,
            pack,
            description,
            enabled,
            runner_type,
            parameters,
            required_parameters,
        } = input;

        validate_parameter_metadata("action", &parameters)?;
        validate_required_names(&required_parameters)?;

        Ok(Self {
            id: NonEmptyString::new(id)?,
            name: NonEmptyString::new(name)?,
            pack: NonEmptyString::new(pack)?,
            description,
            enabled,
            runner_type: NonEmptyString::new(runner_type)?,
            parameters,
            required_parameters,
        })
    }

    /// Returns the stable action identifier.
    #[must_use]
    pub fn id(&self) -> &NonEmptyString {
        &self.id
    }

    /// Returns the action name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the owning pack.
    #[must_use]
    pub fn pack(&self) -> &NonEmptyString {
        &self.pack
    }

    /// Returns the `pack.name` reference string.
    #[must_use]
    pub fn ref_name(&self) -> String {
        format!("{}.{}", self.pack.as_str(), self.name.as_str())
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether executions may be created for this action.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the runner type name.
    #[must_use]
    pub fn runner_type(&self) -> &NonEmptyString {
        &self.runner_type
    }

    /// Returns action parameter metadata keyed by name.
    #[must_use]
    pub fn parameters(&self) -> &BTreeMap<String, Value> {
        &self.parameters
    }

    /// Returns required action parameter names.
    #[must_use]
    pub fn required_parameters(&self) -> &[String] {
        &self.required_parameters
    }

    /// Returns the denormalized reference stored on executions.
    #[must_use]
    pub fn execution_ref(&self) -> ExecutionActionRef {
        ExecutionActionRef {
            id: self.id.as_str().to_owned(),
            name: self.name.as_str().to_owned(),
            pack: self.pack.as_str().to_owned(),
        }
    }
}

/// Caller-supplied pointer to an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionReference {
    /// Lookup by stable identifier.
    Id(String),
    /// Lookup by name, optionally scoped to a pack.
    Name {
        /// Action name.
        name: String,
        /// Optional pack scope.
        pack: Option<String>,
    },
}

impl ActionReference {
    /// Parses a `pack.name` or bare `name` reference string.
    #[must_use]
    pub fn from_ref(value: &str) -> Self {
        match value.split_once('.') {
            Some((pack, name)) if !pack.is_empty() && !name.is_empty() => Self::Name {
                name: name.to_owned(),
                pack: Some(pack.to_owned()),
            },
            _ => Self::Name {
                name: value.to_owned(),
                pack: None,
            },
        }
    }

    /// Returns true when the reference carries no usable lookup key.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Id(id) => id.trim().is_empty(),
            Self::Name { name, .. } => name.trim().is_empty(),
        }
    }

    /// Returns true when this reference points at the given action.
    #[must_use]
    pub fn matches(&self, action: &ActionDefinition) -> bool {
        match self {
            Self::Id(id) => action.id().as_str() == id,
            Self::Name { name, pack } => {
                action.name().as_str() == name
                    && pack
                        .as_deref()
                        .is_none_or(|pack| action.pack().as_str() == pack)
            }
        }
    }
}

impl Display for ActionReference {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(formatter, "id={id}"),
            Self::Name {
                name,
                pack: Some(pack),
            } => write!(formatter, "ref={pack}.{name}"),
            Self::Name { name, pack: None } => write!(formatter, "name={name}"),
        }
    }
}

/// Action descriptor denormalized onto an execution record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionActionRef {
    /// Stable action identifier.
    pub id: String,
    /// Action name.
    pub name: String,
    /// Owning pack.
    pub pack: String,
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{ActionDefinition, ActionDefinitionInput, ActionReference};

    fn action() -> ActionDefinition {
        ActionDefinition::new(ActionDefinitionInput {
            id: "a-1".to_owned(),
            name: "echo".to_owned(),
            pack: "core".to_owned(),
            description: None,
            enabled: true,
            runner_type: "local-shell-cmd".to_owned(),
            parameters: BTreeMap::new(),
            required_parameters: Vec::new(),
        })
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn ref_string_splits_pack_from_name() {
        assert_eq!(
            ActionReference::from_ref("core.echo"),
            ActionReference::Name {
                name: "echo".to_owned(),
                pack: Some("core".to_owned()),
            }
        );
        assert_eq!(
            ActionReference::from_ref("echo"),
            ActionReference::Name {
                name: "echo".to_owned(),
                pack: None,
            }
        );
    }

    #[test]
    fn reference_matches_by_id_or_scoped_name() {
        let action = action();
        assert!(ActionReference::Id("a-1".to_owned()).matches(&action));
        assert!(ActionReference::from_ref("core.echo").matches(&action));
        assert!(ActionReference::from_ref("echo").matches(&action));
        assert!(!ActionReference::from_ref("linux.echo").matches(&action));
    }

    #[test]
    fn execution_ref_carries_identity_fields() {
        let reference = action().execution_ref();
        assert_eq!(reference.id, "a-1");
        assert_eq!(reference.name, "echo");
        assert_eq!(reference.pack, "core");
    }
}
