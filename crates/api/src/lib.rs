//! `api` crate — HTTP REST layer over the workflow service.
//!
//! Routes:
//!   POST /workflows                            define a workflow
//!   GET  /workflows                            list workflows
//!   GET  /workflows/{id}                       fetch one workflow
//!   POST /workflows/{workflowId}/instances     spawn an instance
//!   GET  /instances                            list instances
//!   GET  /instances/{id}                       fetch one instance
//!   POST /instances/{id}/actions/{actionId}    execute an action
//!
//! Transport concerns only: routing, JSON, and mapping engine errors to
//! status codes.  All semantics live in the `engine` crate.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use engine::WorkflowService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WorkflowService>,
}

/// Build the full application router.
pub fn router(service: Arc<WorkflowService>) -> Router {
    Router::new()
        .route(
            "/workflows",
            post(handlers::workflows::create).get(handlers::workflows::list),
        )
        .route("/workflows/:id", get(handlers::workflows::get))
        .route(
            "/workflows/:workflow_id/instances",
            post(handlers::instances::spawn),
        )
        .route("/instances", get(handlers::instances::list))
        .route("/instances/:id", get(handlers::instances::get))
        .route(
            "/instances/:id/actions/:action_id",
            post(handlers::instances::execute),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, service: Arc<WorkflowService>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(service)).await
}

#[cfg(test)]
mod router_tests;
