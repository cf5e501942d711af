use std::sync::Arc;

use widget_db::WidgetStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Handlers keep no
/// state of their own; widget identity and versions live in the store.
#[derive(Clone)]
pub struct AppState {
    /// Authoritative widget store.
    pub store: Arc<dyn WidgetStore>,
    /// Server configuration (base path for `Location` headers).
    pub config: Arc<ServerConfig>,
}
