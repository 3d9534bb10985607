mod cors;

use axum::Router;
use axum::routing::{get, put};
use stackrun_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

use cors::build_cors_layer;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let execution_routes = Router::new()
        .route(
            "/api/executions",
            get(handlers::executions::list_executions_handler)
                .post(handlers::executions::create_execution_handler),
        )
        .route(
            "/api/executions/{execution_id}",
            get(handlers::executions::get_execution_handler)
                .put(handlers::executions::update_execution_handler),
        );

    let registry_routes = Router::new()
        .route(
            "/api/runner-types/{runner_type_name}",
            put(handlers::actions::save_runner_type_handler),
        )
        .route("/api/actions", get(handlers::actions::list_actions_handler))
        .route(
            "/api/actions/{action_id}",
            put(handlers::actions::save_action_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(execution_routes)
        .merge(registry_routes)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
