//! Integration tests driving `RestProxyClient` against a local mock of
//! the ArmorIQ proxy.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

use aq_domain::config::ProxyConfig;
use aq_domain::error::Error;
use aq_proxy_client::{Permissions, PolicyCreate, ProxyProvider, RestProxyClient};

/// Bind the router on an ephemeral port and serve it in the background.
async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr, timeout_ms: u64) -> RestProxyClient {
    let cfg = ProxyConfig {
        base_url: format!("http://{addr}"),
        timeout_ms,
    };
    RestProxyClient::new(&cfg).unwrap()
}

#[tokio::test]
async fn health_decodes_expected_json() {
    let app = Router::new().route(
        "/health",
        get(|| async { Json(json!({ "status": "ok", "endpoints": 3 })) }),
    );
    let addr = serve(app).await;

    let body = client_for(addr, 1000).health().await.unwrap();
    assert_eq!(body, Some(json!({ "status": "ok", "endpoints": 3 })));
}

#[tokio::test]
async fn delete_policy_returns_unit_on_204() {
    let app = Router::new().route(
        "/api/policies/:id",
        delete(|| async { StatusCode::NO_CONTENT }),
    );
    let addr = serve(app).await;

    client_for(addr, 1000).delete_policy("a1").await.unwrap();
}

#[tokio::test]
async fn empty_body_on_200_yields_none() {
    let app = Router::new().route("/api/audit-logs", get(|| async { StatusCode::OK }));
    let addr = serve(app).await;

    let body = client_for(addr, 1000).audit_logs().await.unwrap();
    assert!(body.is_none());
}

#[tokio::test]
async fn unexpected_status_carries_upstream_detail() {
    let app = Router::new().route(
        "/api/policies/:id",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))) }),
    );
    let addr = serve(app).await;

    let err = client_for(addr, 1000).policy("ghost").await.unwrap_err();
    match err {
        Error::Upstream { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, json!({ "error": "not found" }));
        }
        other => panic!("expected Upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn plain_text_error_synthesized_into_object() {
    let app = Router::new().route(
        "/api/endpoints",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "proxy blew up") }),
    );
    let addr = serve(app).await;

    let err = client_for(addr, 1000).endpoints().await.unwrap_err();
    match err {
        Error::Upstream { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, json!({ "error": "proxy blew up" }));
        }
        other => panic!("expected Upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_204_synthesizes_reason_phrase() {
    let app = Router::new().route("/health", get(|| async { StatusCode::NO_CONTENT }));
    let addr = serve(app).await;

    let err = client_for(addr, 1000).health().await.unwrap_err();
    match err {
        Error::Upstream { status, detail } => {
            assert_eq!(status, 204);
            assert_eq!(detail, json!({ "error": "No Content" }));
        }
        other => panic!("expected Upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_on_success_is_protocol_error() {
    let app = Router::new().route("/api/policies", get(|| async { "not-json" }));
    let addr = serve(app).await;

    let err = client_for(addr, 1000).list_policies().await.unwrap_err();
    assert!(matches!(err, Error::UpstreamProtocol(_)), "got {err:?}");
}

#[tokio::test]
async fn slow_proxy_maps_to_timeout_error() {
    let app = Router::new().route(
        "/health",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Json(json!({ "status": "ok" }))
        }),
    );
    let addr = serve(app).await;

    let err = client_for(addr, 50).health().await.unwrap_err();
    assert!(matches!(err, Error::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_proxy_maps_to_http_error() {
    // Grab a port that nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr, 1000).health().await.unwrap_err();
    assert!(matches!(err, Error::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn create_policy_forwards_body_and_decodes_201() {
    let captured: Arc<RwLock<Option<Value>>> = Arc::new(RwLock::new(None));
    let captured_clone = captured.clone();

    let app = Router::new()
        .route(
            "/api/policies",
            post(
                move |State(cap): State<Arc<RwLock<Option<Value>>>>, Json(body): Json<Value>| async move {
                    *cap.write().await = Some(body);
                    (
                        StatusCode::CREATED,
                        Json(json!({ "agentId": "a1", "endpointId": "e1" })),
                    )
                },
            ),
        )
        .with_state(captured_clone);
    let addr = serve(app).await;

    let req = PolicyCreate {
        agent_id: "a1".into(),
        endpoint_id: "e1".into(),
        permissions: Permissions {
            read: Some(true),
            ..Permissions::default()
        },
    };
    let body = client_for(addr, 1000).create_policy(req).await.unwrap();
    assert_eq!(body, Some(json!({ "agentId": "a1", "endpointId": "e1" })));

    // Unset permission flags must be omitted from the forwarded JSON.
    let seen = captured.read().await.clone().unwrap();
    assert_eq!(
        seen,
        json!({
            "agentId": "a1",
            "endpointId": "e1",
            "permissions": { "read": true }
        })
    );
}

#[tokio::test]
async fn create_policy_against_200_is_upstream_error() {
    let app = Router::new().route(
        "/api/policies",
        post(|| async { (StatusCode::OK, Json(json!({ "agentId": "a1" }))) }),
    );
    let addr = serve(app).await;

    let req = PolicyCreate {
        agent_id: "a1".into(),
        endpoint_id: "e1".into(),
        permissions: Permissions::default(),
    };
    let err = client_for(addr, 1000).create_policy(req).await.unwrap_err();
    match err {
        Error::Upstream { status, .. } => assert_eq!(status, 200),
        other => panic!("expected Upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn forwarded_requests_carry_trace_headers() {
    async fn echo_headers(headers: HeaderMap) -> impl IntoResponse {
        let trace_id = headers
            .get("x-trace-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        let client_type = headers
            .get("x-client-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        Json(json!({ "traceId": trace_id, "clientType": client_type }))
    }

    let app = Router::new().route("/health", get(echo_headers));
    let addr = serve(app).await;

    let body = client_for(addr, 1000).health().await.unwrap().unwrap();
    assert_eq!(body["clientType"], "armoriq-admin");
    assert!(!body["traceId"].as_str().unwrap().is_empty());
}
