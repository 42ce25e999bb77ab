use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub card_id: Uuid,
    pub description: String,
    pub completed: bool,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTask {
    pub description: Option<String>,
    pub completed: Option<bool>,
}
