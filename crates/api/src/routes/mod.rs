pub mod health;
pub mod widget;

use axum::Router;

use crate::state::AppState;

/// Build the widget route tree, mounted under the configured base path.
///
/// Route hierarchy:
///
/// ```text
/// /widgets          list, create
/// /widget           create
/// /widget/{id}      get, update (If-Match required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(widget::router())
}
