use sqlx::SqlitePool;
use std::sync::Arc;

use crate::repo::{session::SessionRepository, user::UserRepository};
use crate::workspace::Workspace;

#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub sessions: SessionRepository,
    pub workspace: Workspace,
    pub pool: Arc<SqlitePool>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let pool = Arc::new(pool);
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool.clone()),
            workspace: Workspace::new(pool.clone()),
            pool,
        }
    }
}
