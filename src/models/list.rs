use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A list of cards on a board. Named `BoardList` to stay clear of `Vec`-ish
/// meanings of "list".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoardList {
    pub id: Uuid,
    pub board_id: Uuid,
    pub name: String,
    pub position: i32,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateList {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateList {
    pub name: Option<String>,
    pub position: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub id: Uuid,
    pub board_id: Uuid,
    pub name: String,
    pub position: i32,
    pub owner_id: Option<Uuid>,
    pub cards: Vec<super::card::CardResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BoardList> for ListResponse {
    fn from(list: BoardList) -> Self {
        Self {
            id: list.id,
            board_id: list.board_id,
            name: list.name,
            position: list.position,
            owner_id: list.owner_id,
            cards: vec![],
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}
