use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use super::missing_row;
use crate::error::{AppError, Result};
use crate::models::BoardList;

#[derive(Clone)]
pub struct ListRepository {
    pool: Arc<SqlitePool>,
}

impl ListRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Inserts a list at `position`. Callers hold the board's position lock.
    pub async fn create(
        &self,
        board_id: Uuid,
        name: &str,
        position: i32,
        owner_id: Uuid,
    ) -> Result<BoardList> {
        let id = Uuid::new_v4();

        let list = sqlx::query_as::<_, BoardList>(
            r#"
            INSERT INTO lists (id, board_id, name, position, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(board_id)
        .bind(name)
        .bind(position)
        .bind(owner_id)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(list)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BoardList>> {
        let list = sqlx::query_as::<_, BoardList>("SELECT * FROM lists WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(list)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<BoardList> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound("List"))
    }

    pub async fn list_by_board(&self, board_id: Uuid) -> Result<Vec<BoardList>> {
        let lists = sqlx::query_as::<_, BoardList>(
            r#"
            SELECT * FROM lists
            WHERE board_id = $1
            ORDER BY position ASC, created_at ASC, id ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(lists)
    }

    pub async fn positions(&self, board_id: Uuid) -> Result<Vec<i32>> {
        let positions =
            sqlx::query_scalar::<_, i32>("SELECT position FROM lists WHERE board_id = $1")
                .bind(board_id)
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(positions)
    }

    pub async fn update(&self, id: Uuid, name: Option<&str>, position: i32) -> Result<BoardList> {
        let list = sqlx::query_as::<_, BoardList>(
            r#"
            UPDATE lists
            SET name = COALESCE($2, name),
                position = $3,
                updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(position)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| missing_row(e, "List"))?;

        Ok(list)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("List"));
        }

        Ok(())
    }
}
