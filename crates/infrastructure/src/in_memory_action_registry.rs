use std::collections::HashMap;

use async_trait::async_trait;
use stackrun_application::ActionRegistry;
use stackrun_core::{AppError, AppResult};
use stackrun_domain::{ActionDefinition, ActionReference, RunnerType};
use tokio::sync::RwLock;

/// In-memory action and runner type registry.
#[derive(Debug, Default)]
pub struct InMemoryActionRegistry {
    actions: RwLock<HashMap<String, ActionDefinition>>,
    runner_types: RwLock<HashMap<String, RunnerType>>,
}

impl InMemoryActionRegistry {
    /// Creates an empty in-memory registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: RwLock::new(HashMap::new()),
            runner_types: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ActionRegistry for InMemoryActionRegistry {
    async fn resolve_action(
        &self,
        reference: &ActionReference,
    ) -> AppResult<Option<ActionDefinition>> {
        let actions = self.actions.read().await;

        if let ActionReference::Id(id) = reference {
            return Ok(actions.get(id).cloned());
        }

        let mut matches: Vec<&ActionDefinition> = actions
            .values()
            .filter(|action| reference.matches(action))
            .collect();
        matches.sort_by(|left, right| left.pack().as_str().cmp(right.pack().as_str()));

        Ok(matches.first().map(|action| (*action).clone()))
    }

    async fn find_runner_type(&self, name: &str) -> AppResult<Option<RunnerType>> {
        Ok(self.runner_types.read().await.get(name).cloned())
    }

    async fn list_actions(&self) -> AppResult<Vec<ActionDefinition>> {
        let mut values: Vec<ActionDefinition> =
            self.actions.read().await.values().cloned().collect();
        values.sort_by(|left, right| left.ref_name().cmp(&right.ref_name()));

        Ok(values)
    }

    async fn save_action(&self, action: ActionDefinition) -> AppResult<()> {
        let mut actions = self.actions.write().await;

        let duplicate = actions.values().any(|stored| {
            stored.id() != action.id()
                && stored.pack() == action.pack()
                && stored.name() == action.name()
        });
        if duplicate {
            return Err(AppError::Validation(format!(
                "action '{}' is already registered under another id",
                action.ref_name()
            )));
        }

        actions.insert(action.id().as_str().to_owned(), action);
        Ok(())
    }

    async fn save_runner_type(&self, runner_type: RunnerType) -> AppResult<()> {
        self.runner_types
            .write()
            .await
            .insert(runner_type.name().as_str().to_owned(), runner_type);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use stackrun_application::ActionRegistry;
    use stackrun_domain::{ActionDefinition, ActionDefinitionInput, ActionReference};

    use super::InMemoryActionRegistry;

    fn action(id: &str, pack: &str, name: &str) -> ActionDefinition {
        ActionDefinition::new(ActionDefinitionInput {
            id: id.to_owned(),
            name: name.to_owned(),
            pack: pack.to_owned(),
            description: None,
            enabled: true,
            runner_type: "run-local".to_owned(),
            parameters: BTreeMap::new(),
            required_parameters: Vec::new(),
        })
        .unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn resolves_by_id_and_pack_scoped_name() {
        let registry = InMemoryActionRegistry::new();
        assert!(registry.save_action(action("a-1", "core", "echo")).await.is_ok());
        assert!(registry.save_action(action("a-2", "linux", "echo")).await.is_ok());

        let by_id = registry
            .resolve_action(&ActionReference::Id("a-2".to_owned()))
            .await
            .unwrap_or_default();
        assert_eq!(by_id.map(|value| value.ref_name()), Some("linux.echo".to_owned()));

        let by_ref = registry
            .resolve_action(&ActionReference::from_ref("linux.echo"))
            .await
            .unwrap_or_default();
        assert_eq!(by_ref.map(|value| value.id().as_str().to_owned()), Some("a-2".to_owned()));
    }

    #[tokio::test]
    async fn duplicate_pack_name_under_new_id_is_rejected() {
        let registry = InMemoryActionRegistry::new();
        assert!(registry.save_action(action("a-1", "core", "echo")).await.is_ok());

        let result = registry.save_action(action("a-9", "core", "echo")).await;
        assert!(result.is_err());
    }
}
