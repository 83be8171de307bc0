use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use super::error::ApiError;
use super::proxy_body;
use crate::state::AppState;

/// GET /status — proxy health and inventory snapshot.
pub async fn get_status(State(state): State<AppState>) -> Result<Response, ApiError> {
    let body = state.proxy.health().await?;
    Ok(proxy_body(StatusCode::OK, body))
}
