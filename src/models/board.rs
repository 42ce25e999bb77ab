use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::Standing;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBoard {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBoard {
    pub name: Option<String>,
}

/// Payload for adding a member at any level.
#[derive(Debug, Deserialize)]
pub struct AddMember {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub role: Standing,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub fn into_response(self, role: Standing) -> BoardResponse {
        BoardResponse {
            id: self.id,
            name: self.name,
            owner_id: self.owner_id,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BoardWithDetails {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub role: Standing,
    pub members: Vec<super::user::UserSummary>,
    pub lists: Vec<super::list::ListResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
