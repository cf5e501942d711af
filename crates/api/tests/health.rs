//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, in_memory_app, send};
use widget_db::{StoreError, WidgetStore};

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let (app, _store) = in_memory_app(vec![]);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store_healthy"], true);
}

// ---------------------------------------------------------------------------
// Test: an unreachable store reports degraded health
// ---------------------------------------------------------------------------

struct UnreachableStore;

#[async_trait::async_trait]
impl WidgetStore for UnreachableStore {
    async fn find_all(&self) -> Result<Vec<widget_db::models::widget::Widget>, StoreError> {
        Err(StoreError::Backend("down".into()))
    }

    async fn find_by_id(
        &self,
        _id: i64,
    ) -> Result<Option<widget_db::models::widget::Widget>, StoreError> {
        Err(StoreError::Backend("down".into()))
    }

    async fn save(
        &self,
        _widget: widget_db::models::widget::Widget,
    ) -> Result<widget_db::models::widget::Widget, StoreError> {
        Err(StoreError::Backend("down".into()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Backend("down".into()))
    }
}

#[tokio::test]
async fn health_check_reports_degraded_store() {
    let app = common::build_test_app(Arc::new(UnreachableStore));
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let (app, _store) = in_memory_app(vec![]);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let (app, _store) = in_memory_app(vec![]);
    let response = get(app, "/rest/widgets").await;

    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight for a conditional update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_allows_if_match() {
    let (app, _store) = in_memory_app(vec![]);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/rest/widget/1")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "content-type,if-match")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();

    let allow_origin = headers
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");

    let allow_methods = headers
        .get("access-control-allow-methods")
        .expect("Missing Access-Control-Allow-Methods header")
        .to_str()
        .unwrap();
    assert!(
        allow_methods.contains("PUT"),
        "Allow-Methods should contain PUT, got: {allow_methods}"
    );

    let allow_headers = headers
        .get("access-control-allow-headers")
        .expect("Missing Access-Control-Allow-Headers header")
        .to_str()
        .unwrap();
    assert!(
        allow_headers.contains("if-match"),
        "Allow-Headers should contain if-match, got: {allow_headers}"
    );
}

// ---------------------------------------------------------------------------
// Test: ETag and Location are exposed to browser clients
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_exposes_etag_and_location() {
    let (app, _store) = in_memory_app(vec![]);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/rest/widgets")
        .header("Origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;

    let exposed = response
        .headers()
        .get("access-control-expose-headers")
        .expect("Missing Access-Control-Expose-Headers header")
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(exposed.contains("etag"), "got: {exposed}");
    assert!(exposed.contains("location"), "got: {exposed}");
}
