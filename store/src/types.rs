//! Record types shared by every store backend.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a todo record.
pub type TodoId = i64;

/// Longest name, in characters, a record may hold.
pub const MAX_NAME_CHARS: usize = 200;

/// A persisted todo record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub name: String,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert payload: everything but the id, which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub name: String,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
}

impl NewTodo {
    /// The timestamp is truncated to microseconds, the finest precision the
    /// SQLite backend keeps, so an inserted record compares equal to the
    /// same record read back later.
    pub fn new(name: impl Into<String>, is_complete: bool, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            is_complete,
            created_at: created_at.trunc_subsecs(6),
        }
    }

    pub(crate) fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            name: self.name,
            is_complete: self.is_complete,
            created_at: self.created_at,
        }
    }
}
