use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::access::Level;
use crate::error::{AppError, Result};
use crate::models::UserSummary;

/// Member sets for one entity level. Each level has its own table and
/// membership never spills over to another level.
#[derive(Clone)]
pub struct MembershipRepository {
    pool: Arc<SqlitePool>,
    level: Level,
}

impl MembershipRepository {
    pub fn new(pool: Arc<SqlitePool>, level: Level) -> Self {
        Self { pool, level }
    }

    fn table(&self) -> (&'static str, &'static str) {
        match self.level {
            Level::Board => ("board_members", "board_id"),
            Level::List => ("list_members", "list_id"),
            Level::Card => ("card_members", "card_id"),
            Level::Task => ("task_members", "task_id"),
        }
    }

    pub async fn list(&self, entity_id: Uuid) -> Result<Vec<Uuid>> {
        let (table, column) = self.table();
        let query = format!(
            "SELECT user_id FROM {} WHERE {} = $1 ORDER BY created_at ASC",
            table, column
        );

        let members = sqlx::query_scalar::<_, Uuid>(&query)
            .bind(entity_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(members)
    }

    pub async fn list_users(&self, entity_id: Uuid) -> Result<Vec<UserSummary>> {
        let (table, column) = self.table();
        let query = format!(
            r#"
            SELECT u.id, u.username FROM users u
            INNER JOIN {} m ON m.user_id = u.id
            WHERE m.{} = $1
            ORDER BY u.username ASC
            "#,
            table, column
        );

        let users = sqlx::query_as::<_, UserSummary>(&query)
            .bind(entity_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(users)
    }

    /// Adds a member. Returns `false` when the user was already one.
    pub async fn add(&self, entity_id: Uuid, user_id: Uuid) -> Result<bool> {
        let (table, column) = self.table();
        let query = format!(
            "INSERT INTO {} ({}, user_id, created_at) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
            table, column
        );

        let result = sqlx::query(&query)
            .bind(entity_id)
            .bind(user_id)
            .bind(Utc::now())
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn remove(&self, entity_id: Uuid, user_id: Uuid) -> Result<()> {
        let (table, column) = self.table();
        let query = format!("DELETE FROM {} WHERE {} = $1 AND user_id = $2", table, column);

        let result = sqlx::query(&query)
            .bind(entity_id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Member"));
        }

        Ok(())
    }
}
