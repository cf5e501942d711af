//! Request handlers.
//!
//! Handlers delegate to the [`WidgetStore`](widget_db::WidgetStore) held in
//! [`AppState`](crate::state::AppState) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod widget;
