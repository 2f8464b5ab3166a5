use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::document::{Category, CategoryContent, GalleryContent, GalleryItem, Promo};
use crate::error::{StoreError, StoreResult};
use crate::mutation::{upsert_category_content, CategoryDraft, PromoPatch};

use super::{ConnectionState, DocumentStore};

/// Upper bound on the health ping round trip.
const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Document store backed by PostgreSQL tables holding one JSON document per row.
///
/// Category content is written as text into a `JSON` column so product spec
/// keys come back in the order they were sent.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_category(row: &PgRow) -> StoreResult<Category> {
        let content: Value = row.try_get("content")?;
        Ok(Category {
            content: serde_json::from_value(content)?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn map_promo(row: &PgRow) -> StoreResult<Promo> {
        let content: Value = row.try_get("content")?;
        Ok(Promo {
            content: serde_json::from_value(content)?,
            created_at: Some(row.try_get("created_at")?),
            updated_at: Some(row.try_get("updated_at")?),
        })
    }

    fn map_gallery_item(row: &PgRow) -> StoreResult<GalleryItem> {
        let content: Value = row.try_get("content")?;
        Ok(GalleryItem {
            id: row.try_get("id")?,
            content: serde_json::from_value(content)?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT content, created_at, updated_at
            FROM categories
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_category).collect()
    }

    async fn create_category(&self, content: CategoryContent) -> StoreResult<Category> {
        let body = serde_json::to_string(&content)?;

        let row = sqlx::query(
            r#"
            INSERT INTO categories (id, content)
            VALUES ($1, $2::text::json)
            RETURNING content, created_at, updated_at
            "#,
        )
        .bind(&content.id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateKey(content.id.clone())
            } else {
                StoreError::Database(e)
            }
        })?;

        Self::map_category(&row)
    }

    async fn replace_categories(&self, contents: Vec<CategoryContent>) -> StoreResult<usize> {
        let mut tx = self.pool.begin().await?;

        // Concurrent replaces queue here instead of interleaving their deletes and inserts.
        sqlx::query("LOCK TABLE categories IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;
        let removed = sqlx::query("DELETE FROM categories")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        for content in &contents {
            sqlx::query("INSERT INTO categories (id, content) VALUES ($1, $2::text::json)")
                .bind(&content.id)
                .bind(serde_json::to_string(content)?)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::debug!(removed, inserted = contents.len(), "replaced categories");
        Ok(contents.len())
    }

    async fn upsert_category(&self, id: &str, patch: CategoryDraft) -> StoreResult<Category> {
        let mut tx = self.pool.begin().await?;

        // `FOR UPDATE` locks nothing while the row does not exist yet, so two upserts
        // creating the same id serialize on a transaction-scoped advisory lock instead.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let existing = sqlx::query("SELECT content FROM categories WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .map(|row| -> StoreResult<CategoryContent> {
                let content: Value = row.try_get("content")?;
                Ok(serde_json::from_value(content)?)
            })
            .transpose()?;

        let content = upsert_category_content(id, existing, patch)?;

        let row = sqlx::query(
            r#"
            INSERT INTO categories (id, content)
            VALUES ($1, $2::text::json)
            ON CONFLICT (id) DO UPDATE
                SET content = EXCLUDED.content,
                    updated_at = now()
            RETURNING content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(serde_json::to_string(&content)?)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Self::map_category(&row)
    }

    async fn delete_category(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn current_promo(&self) -> StoreResult<Option<Promo>> {
        sqlx::query(
            r#"
            SELECT content, created_at, updated_at
            FROM promos
            WHERE singleton = 'current'
            "#,
        )
        .fetch_optional(&self.pool)
        .await?
        .as_ref()
        .map(Self::map_promo)
        .transpose()
    }

    async fn upsert_promo(&self, patch: PromoPatch) -> StoreResult<Promo> {
        // Absent fields are skipped when serializing, so `||` only overwrites what was sent.
        let row = sqlx::query(
            r#"
            INSERT INTO promos (singleton, content)
            VALUES ('current', $1)
            ON CONFLICT (singleton) DO UPDATE
                SET content = promos.content || EXCLUDED.content,
                    updated_at = now()
            RETURNING content, created_at, updated_at
            "#,
        )
        .bind(Json(&patch))
        .fetch_one(&self.pool)
        .await?;

        Self::map_promo(&row)
    }

    async fn list_gallery(&self) -> StoreResult<Vec<GalleryItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, content, created_at, updated_at
            FROM gallery_items
            ORDER BY created_at DESC, seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_gallery_item).collect()
    }

    async fn create_gallery_item(&self, content: GalleryContent) -> StoreResult<GalleryItem> {
        let row = sqlx::query(
            r#"
            INSERT INTO gallery_items (id, content)
            VALUES ($1, $2)
            RETURNING id, content, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(Json(&content))
        .fetch_one(&self.pool)
        .await?;

        Self::map_gallery_item(&row)
    }

    async fn replace_gallery(&self, contents: Vec<GalleryContent>) -> StoreResult<usize> {
        let ids: Vec<Uuid> = contents.iter().map(|_| Uuid::now_v7()).collect();
        let bodies = contents
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("LOCK TABLE gallery_items IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM gallery_items")
            .execute(&mut *tx)
            .await?;

        let inserted = if contents.is_empty() {
            0
        } else {
            sqlx::query(
                r#"
                INSERT INTO gallery_items (id, content)
                SELECT id, content
                FROM UNNEST($1::uuid[], $2::jsonb[]) WITH ORDINALITY AS t(id, content, ord)
                ORDER BY ord
                "#,
            )
            .bind(&ids)
            .bind(&bodies)
            .execute(&mut *tx)
            .await?
            .rows_affected() as usize
        };

        tx.commit().await?;
        Ok(inserted)
    }

    async fn delete_gallery_item(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM gallery_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn connection_state(&self) -> ConnectionState {
        if self.pool.is_closed() {
            return ConnectionState::Disconnected;
        }

        let ping = sqlx::query("SELECT 1").execute(&self.pool);
        match tokio::time::timeout(PING_TIMEOUT, ping).await {
            Ok(Ok(_)) => ConnectionState::Connected,
            Ok(Err(e)) => {
                tracing::warn!("database ping failed: {e}");
                ConnectionState::Disconnected
            }
            Err(_) => {
                tracing::warn!("database ping timed out after {PING_TIMEOUT:?}");
                ConnectionState::Disconnected
            }
        }
    }
}
