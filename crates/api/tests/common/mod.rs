#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_TYPE, IF_MATCH};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use widget_api::config::ServerConfig;
use widget_api::router::build_app_router;
use widget_api::state::AppState;
use widget_core::types::DbId;
use widget_db::models::widget::Widget;
use widget_db::{InMemoryWidgetStore, StoreError, WidgetStore};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and the `/rest` base path.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        api_base_path: "/rest".to_string(),
        database_url: None,
    }
}

/// Build the full application router over the given store.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(store: Arc<dyn WidgetStore>) -> Router {
    build_test_app_with_config(store, test_config())
}

pub fn build_test_app_with_config(store: Arc<dyn WidgetStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Router over a fresh in-memory store, plus a handle on that store.
pub fn in_memory_app(widgets: Vec<Widget>) -> (Router, Arc<InMemoryWidgetStore>) {
    let store = Arc::new(InMemoryWidgetStore::with_widgets(widgets));
    let app = build_test_app(store.clone());
    (app, store)
}

// ---------------------------------------------------------------------------
// Scripted store
// ---------------------------------------------------------------------------

/// A store whose answers are fixed up front, recording every `save` call.
///
/// Lets handler tests pin exactly what the store returns without the store's
/// own id and version bookkeeping getting in the way.
#[derive(Default)]
pub struct ScriptedStore {
    pub all: Vec<Widget>,
    pub by_id: HashMap<DbId, Widget>,
    pub save_result: Option<Widget>,
    pub fail_with_backend_error: bool,
    pub saved: Mutex<Vec<Widget>>,
}

impl ScriptedStore {
    pub fn saved(&self) -> Vec<Widget> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl WidgetStore for ScriptedStore {
    async fn find_all(&self) -> Result<Vec<Widget>, StoreError> {
        if self.fail_with_backend_error {
            return Err(StoreError::Backend("connection reset".into()));
        }
        Ok(self.all.clone())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Widget>, StoreError> {
        if self.fail_with_backend_error {
            return Err(StoreError::Backend("connection reset".into()));
        }
        Ok(self.by_id.get(&id).cloned())
    }

    async fn save(&self, widget: Widget) -> Result<Widget, StoreError> {
        self.saved.lock().unwrap().push(widget);
        self.save_result
            .clone()
            .ok_or_else(|| StoreError::Backend("no scripted save result".into()))
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// PUT a JSON body, optionally carrying an `If-Match` header.
pub async fn put_json(
    app: Router,
    uri: &str,
    if_match: Option<&str>,
    body: serde_json::Value,
) -> Response {
    let mut builder = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = if_match {
        builder = builder.header(IF_MATCH, token);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

/// A response header as a string, if present.
pub fn header(response: &Response, name: impl axum::http::header::AsHeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .map(|v| v.to_str().unwrap().to_string())
}
