//! The widget store capability consumed by the HTTP layer.

use async_trait::async_trait;
use widget_core::types::{DbId, Version};

use crate::models::widget::Widget;

/// Failures reported by a [`WidgetStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An update targeted an id the store does not hold.
    #[error("Widget with id {id} not found")]
    NotFound { id: DbId },

    /// An update carried a version that is no longer current.
    #[error("Widget {id} version conflict: expected {expected}, found {actual}")]
    VersionConflict {
        id: DbId,
        expected: Version,
        actual: Version,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Backend(String),
}

/// Authoritative holder of widgets.
///
/// Implementations assign ids and versions; callers never do.
#[async_trait]
pub trait WidgetStore: Send + Sync {
    /// Every widget, ordered by id.
    async fn find_all(&self) -> Result<Vec<Widget>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Widget>, StoreError>;

    /// Persist a widget.
    ///
    /// A widget without an id is inserted with a fresh id and version 1.
    /// A widget with an id is a compare-and-swap: it is written only if the
    /// stored version still equals `widget.version`, and comes back with the
    /// version incremented by one. Otherwise nothing is written and
    /// [`StoreError::NotFound`] or [`StoreError::VersionConflict`] is returned.
    async fn save(&self, widget: Widget) -> Result<Widget, StoreError>;

    /// Whether the backing storage is reachable.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
