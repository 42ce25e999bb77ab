use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use super::missing_row;
use crate::error::{AppError, Result};
use crate::models::Board;

#[derive(Clone)]
pub struct BoardRepository {
    pool: Arc<SqlitePool>,
}

impl BoardRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str, owner_id: Uuid) -> Result<Board> {
        let id = Uuid::new_v4();

        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (id, name, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(owner_id)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(board)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>("SELECT * FROM boards WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(board)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Board> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound("Board"))
    }

    /// Boards the user owns or is a member of, each listed once.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Board>> {
        let boards = sqlx::query_as::<_, Board>(
            r#"
            SELECT b.* FROM boards b
            WHERE b.owner_id = $1
               OR EXISTS (
                   SELECT 1 FROM board_members bm
                   WHERE bm.board_id = b.id AND bm.user_id = $1
               )
            ORDER BY b.created_at ASC, b.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(boards)
    }

    pub async fn update(&self, id: Uuid, name: Option<&str>) -> Result<Board> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            UPDATE boards
            SET name = COALESCE($2, name),
                updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| missing_row(e, "Board"))?;

        Ok(board)
    }

    /// Removes the board; lists, cards, tasks and labels go with it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Board"));
        }

        Ok(())
    }
}
