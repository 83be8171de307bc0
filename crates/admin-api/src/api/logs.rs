use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use super::error::ApiError;
use super::proxy_body;
use crate::state::AppState;

/// GET /logs — recent audit log entries from the proxy.
pub async fn get_logs(State(state): State<AppState>) -> Result<Response, ApiError> {
    let body = state.proxy.audit_logs().await?;
    Ok(proxy_body(StatusCode::OK, body))
}
