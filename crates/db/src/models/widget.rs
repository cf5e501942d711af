//! Widget entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use widget_core::types::{DbId, Version};

/// A widget, persisted or not.
///
/// `id` is `None` and `version` is `0` until the store saves the widget for
/// the first time.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Widget {
    pub id: Option<DbId>,
    pub name: String,
    pub description: String,
    pub version: Version,
}

impl Widget {
    /// An unsaved widget carrying only its descriptive fields.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            version: 0,
        }
    }

    /// A widget as the store would return it.
    pub fn persisted(
        id: DbId,
        name: impl Into<String>,
        description: impl Into<String>,
        version: Version,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            description: description.into(),
            version,
        }
    }

    /// Replace the descriptive fields, keeping identity and version.
    pub fn with_input(self, input: WidgetInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            ..self
        }
    }
}

/// Request body for create and update. Any `id` or `version` sent by the
/// client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetInput {
    pub name: String,
    pub description: String,
}

impl From<WidgetInput> for Widget {
    fn from(input: WidgetInput) -> Self {
        Widget::new(input.name, input.description)
    }
}
