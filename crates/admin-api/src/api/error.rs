use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use aq_domain::error::Error;

/// Error wrapper that renders domain failures as facade responses.
///
/// Upstream errors reuse the proxy's status code verbatim and republish
/// its detail payload as the body.  Transport failures map onto gateway
/// codes: timeouts become 504, everything else 502.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::Upstream { status, detail } => {
                let code =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (code, Json(detail)).into_response()
            }
            Error::UpstreamProtocol(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Invalid JSON from proxy", "details": detail })),
            )
                .into_response(),
            Error::Timeout(msg) => {
                (StatusCode::GATEWAY_TIMEOUT, Json(json!({ "error": msg }))).into_response()
            }
            Error::Http(msg) => {
                (StatusCode::BAD_GATEWAY, Json(json!({ "error": msg }))).into_response()
            }
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": other.to_string() })),
            )
                .into_response(),
        }
    }
}
