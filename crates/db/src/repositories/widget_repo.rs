//! Repository for the `widgets` table.

use async_trait::async_trait;
use sqlx::PgPool;
use widget_core::types::{DbId, Version};

use crate::models::widget::Widget;
use crate::store::{StoreError, WidgetStore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, version";

/// Provides the SQL behind [`PgWidgetStore`].
pub struct WidgetRepo;

impl WidgetRepo {
    /// Insert a new widget at version 1, returning the created row.
    pub async fn create(pool: &PgPool, name: &str, description: &str) -> Result<Widget, sqlx::Error> {
        let query = format!(
            "INSERT INTO widgets (name, description, version)
             VALUES ($1, $2, 1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(name)
            .bind(description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Widget>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM widgets WHERE id = $1");
        sqlx::query_as::<_, Widget>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all widgets ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Widget>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM widgets ORDER BY id ASC");
        sqlx::query_as::<_, Widget>(&query).fetch_all(pool).await
    }

    /// Replace name and description if the row is still at `expected_version`.
    ///
    /// The comparison and the increment happen in one statement. Returns
    /// `None` when no row with that id and version exists.
    pub async fn update_if_version(
        pool: &PgPool,
        id: DbId,
        expected_version: Version,
        name: &str,
        description: &str,
    ) -> Result<Option<Widget>, sqlx::Error> {
        let query = format!(
            "UPDATE widgets SET
                name = $2,
                description = $3,
                version = version + 1
             WHERE id = $1 AND version = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(id)
            .bind(name)
            .bind(description)
            .bind(expected_version)
            .fetch_optional(pool)
            .await
    }
}

/// [`WidgetStore`] over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgWidgetStore {
    pool: PgPool,
}

impl PgWidgetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WidgetStore for PgWidgetStore {
    async fn find_all(&self) -> Result<Vec<Widget>, StoreError> {
        Ok(WidgetRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Widget>, StoreError> {
        Ok(WidgetRepo::find_by_id(&self.pool, id).await?)
    }

    async fn save(&self, widget: Widget) -> Result<Widget, StoreError> {
        let Some(id) = widget.id else {
            return Ok(WidgetRepo::create(&self.pool, &widget.name, &widget.description).await?);
        };

        let updated = WidgetRepo::update_if_version(
            &self.pool,
            id,
            widget.version,
            &widget.name,
            &widget.description,
        )
        .await?;

        if let Some(updated) = updated {
            return Ok(updated);
        }

        // Zero rows: tell a missing id apart from a moved version.
        match WidgetRepo::find_by_id(&self.pool, id).await? {
            Some(current) => Err(StoreError::VersionConflict {
                id,
                expected: widget.version,
                actual: current.version,
            }),
            None => Err(StoreError::NotFound { id }),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
