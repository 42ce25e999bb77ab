use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Either a global template (`global`, no card) or a card-scoped instance.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Label {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub global: bool,
    pub card_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGlobalLabel {
    pub name: String,
    pub color: String,
}

/// Attach either by `global_label_id` or by `name` + `color`.
#[derive(Debug, Default, Deserialize)]
pub struct AttachLabel {
    pub name: Option<String>,
    pub color: Option<String>,
    pub global_label_id: Option<Uuid>,
}
