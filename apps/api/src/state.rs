use stackrun_application::{ActionCatalogService, ExecutionService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub execution_service: ExecutionService,
    pub action_catalog_service: ActionCatalogService,
}
