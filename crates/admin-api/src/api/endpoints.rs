use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use super::error::ApiError;
use super::proxy_body;
use crate::state::AppState;

/// GET /endpoints — MCP endpoints registered with the proxy.
pub async fn get_endpoints(State(state): State<AppState>) -> Result<Response, ApiError> {
    let body = state.proxy.endpoints().await?;
    Ok(proxy_body(StatusCode::OK, body))
}
