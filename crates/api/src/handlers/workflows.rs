//! Workflow definition endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use engine::WorkflowDefinition;

use crate::AppState;
use crate::error::ApiError;

pub async fn create(
    State(state): State<AppState>,
    Json(def): Json<WorkflowDefinition>,
) -> Result<(StatusCode, Json<WorkflowDefinition>), ApiError> {
    let def = state.service.define_workflow(def)?;
    Ok((StatusCode::CREATED, Json((*def).clone())))
}

pub async fn get(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WorkflowDefinition>, ApiError> {
    let def = state.service.get_workflow(&id)?;
    Ok(Json((*def).clone()))
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<WorkflowDefinition>> {
    let defs = state
        .service
        .list_workflows()
        .into_iter()
        .map(|def| (*def).clone())
        .collect();
    Json(defs)
}
