pub mod board;
pub mod card;
pub mod label;
pub mod list;
pub mod member;
pub mod session;
pub mod task;
pub mod user;

use crate::error::AppError;

/// Maps a missing row from `UPDATE .. RETURNING` to `NotFound`; the row was
/// deleted between the scope load and the write.
pub(crate) fn missing_row(err: sqlx::Error, entity: &'static str) -> AppError {
    match err {
        sqlx::Error::RowNotFound => AppError::NotFound(entity),
        other => AppError::Database(other),
    }
}

/// Maps a UNIQUE constraint failure to `Conflict`, anything else to `Database`.
pub(crate) fn unique_violation(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(err),
    }
}
