//! Workflow instance endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use engine::WorkflowInstance;

use crate::AppState;
use crate::error::ApiError;

pub async fn spawn(
    Path(workflow_id): Path<String>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<WorkflowInstance>), ApiError> {
    let instance = state.service.spawn_instance(&workflow_id)?;
    Ok((StatusCode::CREATED, Json(instance)))
}

pub async fn execute(
    Path((id, action_id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<WorkflowInstance>, ApiError> {
    let instance = state.service.execute_action(&id, &action_id)?;
    Ok(Json(instance))
}

pub async fn get(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WorkflowInstance>, ApiError> {
    let instance = state.service.get_instance(&id)?;
    Ok(Json(instance))
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<WorkflowInstance>> {
    Json(state.service.list_instances())
}
