//! Route definitions for the widget resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::widget;
use crate::state::AppState;

/// ```text
/// GET    /widgets         -> list
/// POST   /widgets         -> create
/// POST   /widget          -> create
/// GET    /widget/{id}     -> get_by_id
/// PUT    /widget/{id}     -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/widgets", get(widget::list).post(widget::create))
        .route("/widget", post(widget::create))
        .route("/widget/{id}", get(widget::get_by_id).put(widget::update))
}
