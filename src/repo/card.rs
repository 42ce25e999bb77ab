use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use super::missing_row;
use crate::error::{AppError, Result};
use crate::models::Card;

#[derive(Clone)]
pub struct CardRepository {
    pool: Arc<SqlitePool>,
}

impl CardRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Inserts a card at `position`. Callers hold the list's position lock.
    pub async fn create(
        &self,
        list_id: Uuid,
        title: &str,
        description: Option<&str>,
        position: i32,
        owner_id: Uuid,
    ) -> Result<Card> {
        let id = Uuid::new_v4();

        let card = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (id, list_id, title, description, position, start_date, due_date, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NULL, NULL, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(list_id)
        .bind(title)
        .bind(description)
        .bind(position)
        .bind(owner_id)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(card)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Card>> {
        let card = sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(card)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Card> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound("Card"))
    }

    pub async fn list_by_list(&self, list_id: Uuid) -> Result<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT * FROM cards
            WHERE list_id = $1
            ORDER BY position ASC, created_at ASC, id ASC
            "#,
        )
        .bind(list_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(cards)
    }

    pub async fn positions(&self, list_id: Uuid) -> Result<Vec<i32>> {
        let positions =
            sqlx::query_scalar::<_, i32>("SELECT position FROM cards WHERE list_id = $1")
                .bind(list_id)
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(positions)
    }

    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        position: i32,
    ) -> Result<Card> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                position = $4,
                updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(position)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| missing_row(e, "Card"))?;

        Ok(card)
    }

    pub async fn set_dates(
        &self,
        id: Uuid,
        start_date: Option<DateTime<Utc>>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Card> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET start_date = $2,
                due_date = $3,
                updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(start_date)
        .bind(due_date)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| missing_row(e, "Card"))?;

        Ok(card)
    }

    /// Re-parents a card. Callers hold the destination list's position lock.
    pub async fn move_to(&self, id: Uuid, list_id: Uuid, position: i32) -> Result<Card> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET list_id = $2,
                position = $3,
                updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(list_id)
        .bind(position)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| missing_row(e, "Card"))?;

        Ok(card)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Card"));
        }

        Ok(())
    }
}
