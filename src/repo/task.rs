use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use super::missing_row;
use crate::error::{AppError, Result};
use crate::models::Task;

#[derive(Clone)]
pub struct TaskRepository {
    pool: Arc<SqlitePool>,
}

impl TaskRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, card_id: Uuid, description: &str, owner_id: Uuid) -> Result<Task> {
        let id = Uuid::new_v4();

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, card_id, description, completed, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, 0, $4, $5, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(card_id)
        .bind(description)
        .bind(owner_id)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(task)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(task)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Task> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound("Task"))
    }

    pub async fn list_by_card(&self, card_id: Uuid) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE card_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(card_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(tasks)
    }

    pub async fn update(
        &self,
        id: Uuid,
        description: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET description = COALESCE($2, description),
                completed = COALESCE($3, completed),
                updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(description)
        .bind(completed)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| missing_row(e, "Task"))?;

        Ok(task)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task"));
        }

        Ok(())
    }
}
