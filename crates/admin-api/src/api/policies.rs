use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use aq_proxy_client::{PolicyCreate, PolicyUpdate};

use super::error::ApiError;
use super::proxy_body;
use crate::state::AppState;

/// GET /policies — list all agent policies.
pub async fn list_policies(State(state): State<AppState>) -> Result<Response, ApiError> {
    let body = state.proxy.list_policies().await?;
    Ok(proxy_body(StatusCode::OK, body))
}

/// GET /policies/{agentId} — retrieve a single agent policy.
pub async fn get_policy(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> Result<Response, ApiError> {
    let body = state.proxy.policy(&agent_id).await?;
    Ok(proxy_body(StatusCode::OK, body))
}

/// POST /policies — create a new agent policy.  The body is forwarded
/// field-for-field; the proxy answers 201 with the created resource.
pub async fn create_policy(
    State(state): State<AppState>,
    Json(body): Json<PolicyCreate>,
) -> Result<Response, ApiError> {
    let created = state.proxy.create_policy(body).await?;
    Ok(proxy_body(StatusCode::CREATED, created))
}

/// PUT /policies/{agentId} — update an existing policy's permissions.
pub async fn update_policy(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
    Json(body): Json<PolicyUpdate>,
) -> Result<Response, ApiError> {
    let updated = state.proxy.update_policy(&agent_id, body).await?;
    Ok(proxy_body(StatusCode::OK, updated))
}

/// DELETE /policies/{agentId} — delete a policy.  204 on both hops,
/// never a body.
pub async fn delete_policy(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> Result<Response, ApiError> {
    state.proxy.delete_policy(&agent_id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
