use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Label;

#[derive(Clone)]
pub struct LabelRepository {
    pool: Arc<SqlitePool>,
}

impl LabelRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Create a global template, not attached to any card
    pub async fn create_global(&self, name: &str, color: &str, created_by: Uuid) -> Result<Label> {
        let id = Uuid::new_v4();

        let label = sqlx::query_as::<_, Label>(
            r#"
            INSERT INTO labels (id, name, color, global, card_id, created_by, created_at)
            VALUES ($1, $2, $3, 1, NULL, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(color)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(label)
    }

    /// Create a label instance owned by a single card
    pub async fn create_for_card(
        &self,
        card_id: Uuid,
        name: &str,
        color: &str,
        created_by: Uuid,
    ) -> Result<Label> {
        let id = Uuid::new_v4();

        let label = sqlx::query_as::<_, Label>(
            r#"
            INSERT INTO labels (id, name, color, global, card_id, created_by, created_at)
            VALUES ($1, $2, $3, 0, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(color)
        .bind(card_id)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(label)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Label>> {
        let label = sqlx::query_as::<_, Label>("SELECT * FROM labels WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(label)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Label> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound("Label"))
    }

    pub async fn list_global(&self) -> Result<Vec<Label>> {
        let labels = sqlx::query_as::<_, Label>(
            "SELECT * FROM labels WHERE global = 1 ORDER BY name ASC, created_at ASC",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(labels)
    }

    /// Oldest global template with exactly this name and color.
    pub async fn find_global_by_value(&self, name: &str, color: &str) -> Result<Option<Label>> {
        let label = sqlx::query_as::<_, Label>(
            r#"
            SELECT * FROM labels
            WHERE global = 1 AND name = $1 AND color = $2
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .bind(color)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(label)
    }

    pub async fn list_for_card(&self, card_id: Uuid) -> Result<Vec<Label>> {
        let labels = sqlx::query_as::<_, Label>(
            "SELECT * FROM labels WHERE card_id = $1 ORDER BY name ASC, created_at ASC",
        )
        .bind(card_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(labels)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM labels WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Label"));
        }

        Ok(())
    }
}
