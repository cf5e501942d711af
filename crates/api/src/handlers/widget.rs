//! Handlers for the widget resource.
//!
//! Every response that carries a single widget also carries its cache
//! validator: `ETag` is the widget's version as a quoted token. Updates must
//! echo that token back in `If-Match`; the store performs the final
//! compare-and-swap so two writers holding the same token cannot both win.

use axum::extract::{Path, State};
use axum::http::header::{ETAG, IF_MATCH, LOCATION};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use widget_core::error::CoreError;
use widget_core::etag::{format_etag, Precondition};
use widget_core::types::DbId;
use widget_db::models::widget::{Widget, WidgetInput};

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const ENTITY: &str = "Widget";

/// GET {base}/widgets
pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    let widgets = state.store.find_all().await?;
    Ok((
        [(LOCATION, state.config.collection_location())],
        Json(widgets),
    )
        .into_response())
}

/// GET {base}/widget/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let widget = find_existing(&state, id).await?;
    located_response(&state.config, StatusCode::OK, widget)
}

/// POST {base}/widget
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<WidgetInput>,
) -> AppResult<Response> {
    let created = state.store.save(Widget::from(input)).await?;
    tracing::info!(widget_id = ?created.id, "Widget created");
    located_response(&state.config, StatusCode::CREATED, created)
}

/// PUT {base}/widget/{id}
///
/// Requires `If-Match`. A missing id and a stale token both yield 404.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<WidgetInput>,
) -> AppResult<Response> {
    let existing = find_existing(&state, id).await?;

    let precondition = if_match(&headers)?;
    if !precondition.matches(existing.version) {
        tracing::debug!(
            widget_id = id,
            current = existing.version,
            expected = ?precondition.expected(),
            "Rejecting update with stale If-Match"
        );
        return Err(AppError::Core(CoreError::PreconditionFailed { entity: ENTITY, id }));
    }

    // The store bumps the version only if it still equals existing.version.
    let updated = state.store.save(existing.with_input(input)).await?;
    tracing::info!(widget_id = id, version = updated.version, "Widget updated");
    Ok(etag_response(StatusCode::OK, updated))
}

async fn find_existing(state: &AppState, id: DbId) -> AppResult<Widget> {
    state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))
}

/// Parse `If-Match`. A value that is not visible ASCII matches nothing.
fn if_match(headers: &HeaderMap) -> AppResult<Precondition> {
    let value = headers.get(IF_MATCH).ok_or_else(|| {
        CoreError::PreconditionRequired("If-Match header is required to update a widget".into())
    })?;
    Ok(value
        .to_str()
        .map(Precondition::parse)
        .unwrap_or_else(|_| Precondition::unsatisfiable()))
}

/// Body plus `Location` and `ETag` for a widget the store has persisted.
fn located_response(
    config: &ServerConfig,
    status: StatusCode,
    widget: Widget,
) -> AppResult<Response> {
    let id = widget.id.ok_or_else(|| {
        AppError::InternalError("store returned a widget without an id".into())
    })?;
    Ok((
        [(LOCATION, config.widget_location(id))],
        etag_response(status, widget),
    )
        .into_response())
}

/// Body plus `ETag`.
fn etag_response(status: StatusCode, widget: Widget) -> Response {
    (
        status,
        [(ETAG, format_etag(widget.version))],
        Json(widget),
    )
        .into_response()
}
