//! Process-local [`WidgetStore`] backed by a `BTreeMap`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use widget_core::types::{DbId, INITIAL_VERSION};

use crate::models::widget::Widget;
use crate::store::{StoreError, WidgetStore};

#[derive(Debug)]
struct Inner {
    widgets: BTreeMap<DbId, Widget>,
    next_id: DbId,
}

/// In-memory widget store. Nothing survives a restart.
///
/// Every save runs under a single write lock, so the version comparison and
/// the write are one atomic step.
#[derive(Debug)]
pub struct InMemoryWidgetStore {
    inner: RwLock<Inner>,
}

impl Default for InMemoryWidgetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryWidgetStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                widgets: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Seed the store with already-persisted widgets.
    ///
    /// Widgets without an id are skipped. New ids continue after the
    /// highest seeded one.
    pub fn with_widgets(widgets: impl IntoIterator<Item = Widget>) -> Self {
        let widgets: BTreeMap<DbId, Widget> = widgets
            .into_iter()
            .filter_map(|w| w.id.map(|id| (id, w)))
            .collect();
        let next_id = widgets.keys().next_back().map_or(1, |max| max + 1);
        Self {
            inner: RwLock::new(Inner { widgets, next_id }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.widgets.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.widgets.is_empty()
    }
}

#[async_trait]
impl WidgetStore for InMemoryWidgetStore {
    async fn find_all(&self) -> Result<Vec<Widget>, StoreError> {
        Ok(self.inner.read().await.widgets.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Widget>, StoreError> {
        Ok(self.inner.read().await.widgets.get(&id).cloned())
    }

    async fn save(&self, widget: Widget) -> Result<Widget, StoreError> {
        let mut inner = self.inner.write().await;

        let Some(id) = widget.id else {
            let id = inner.next_id;
            inner.next_id += 1;
            let created = Widget {
                id: Some(id),
                version: INITIAL_VERSION,
                ..widget
            };
            inner.widgets.insert(id, created.clone());
            tracing::debug!(widget_id = id, "Widget created");
            return Ok(created);
        };

        let stored = inner
            .widgets
            .get_mut(&id)
            .ok_or(StoreError::NotFound { id })?;

        if stored.version != widget.version {
            return Err(StoreError::VersionConflict {
                id,
                expected: widget.version,
                actual: stored.version,
            });
        }

        let next_version = stored.version.checked_add(1).ok_or_else(|| {
            StoreError::Backend(format!("widget {id} version counter exhausted"))
        })?;

        stored.name = widget.name;
        stored.description = widget.description;
        stored.version = next_version;
        tracing::debug!(widget_id = id, version = stored.version, "Widget updated");
        Ok(stored.clone())
    }
}
