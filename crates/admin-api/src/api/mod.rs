pub mod endpoints;
pub mod error;
pub mod logs;
pub mod policies;
pub mod status;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, post, put};
use axum::Router;
use serde_json::Value;

use crate::state::AppState;

/// Build the full admin API router.
///
/// Every route forwards exactly one call to the ArmorIQ proxy; the
/// response body is the proxy's JSON passed through untouched.
pub fn router() -> Router<AppState> {
    Router::new()
        // Proxy health
        .route("/status", get(status::get_status))
        // Audit logs
        .route("/logs", get(logs::get_logs))
        // Endpoint inventory
        .route("/endpoints", get(endpoints::get_endpoints))
        // Policies (collection)
        .route("/policies", get(policies::list_policies))
        .route("/policies", post(policies::create_policy))
        // Policies (per agent)
        .route("/policies/:agent_id", get(policies::get_policy))
        .route("/policies/:agent_id", put(policies::update_policy))
        .route("/policies/:agent_id", delete(policies::delete_policy))
}

/// Render a forwarded proxy body: JSON when the proxy sent one, an
/// empty response otherwise.
pub(crate) fn proxy_body(status: StatusCode, body: Option<Value>) -> Response {
    match body {
        Some(v) => (status, Json(v)).into_response(),
        None => status.into_response(),
    }
}
