//! Sibling ordering for lists within a board and cards within a list.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Position for a new child appended after `existing`.
///
/// Returns `0` for an empty parent, otherwise one past the highest position.
/// A parent whose highest sibling already sits at `i32::MAX` cannot take
/// another appended child.
pub fn next_position<I>(existing: I) -> Result<i32>
where
    I: IntoIterator<Item = i32>,
{
    match existing.into_iter().max() {
        None => Ok(0),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            AppError::Conflict(
                "No position left after the last sibling; move it to a lower position first"
                    .to_string(),
            )
        }),
    }
}

/// Resolves an update's requested position against the stored one.
///
/// `None` keeps the current value; any other value replaces it verbatim.
/// Siblings are never shifted.
pub fn apply_position(current: i32, requested: Option<i32>) -> Result<i32> {
    match requested {
        None => Ok(current),
        Some(p) if p < 0 => Err(AppError::validation("Position must not be negative")),
        Some(p) => Ok(p),
    }
}

/// Serializes position assignment per parent.
///
/// Each parent id maps to its own async lock; the table only holds locks
/// that are currently in use.
#[derive(Clone, Default)]
pub struct PositionSequencer {
    locks: Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>,
}

pub struct ParentGuard {
    parent_id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>,
}

impl PositionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `parent_id`'s sibling set.
    pub async fn lock(&self, parent_id: Uuid) -> ParentGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(parent_id).or_default().clone()
        };

        let guard = lock.lock_owned().await;

        ParentGuard {
            parent_id,
            guard: Some(guard),
            locks: self.locks.clone(),
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Drop for ParentGuard {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // Only the table holds the lock once every guard and waiter is gone.
        if let Some(lock) = locks.get(&self.parent_id) {
            if Arc::strong_count(lock) == 1 {
                locks.remove(&self.parent_id);
            }
        }
    }
}
