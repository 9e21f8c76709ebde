//! Request and response shapes for the todo API.
//!
//! # Design
//! Full update and completion patch are separate request types, so a patch
//! body has no way to carry a name and cannot touch it. `name` is an
//! `Option` on the request types: a missing or `null` name must surface as a
//! validation error naming the field rather than a generic body rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_store::{Todo, TodoId};

/// Externally visible representation of a todo record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoResponse {
    pub id: TodoId,
    pub name: String,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            name: todo.name,
            is_complete: todo.is_complete,
            created_at: todo.created_at,
        }
    }
}

/// Payload for `POST /todos`. `is_complete` defaults to `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub is_complete: bool,
}

/// Payload for `PUT /todos/{id}`. Both fields are replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    pub name: Option<String>,
    pub is_complete: bool,
}

/// Payload for `PATCH /todos/{id}/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TodoCompletionRequest {
    pub is_complete: bool,
}

/// Path at which a todo can be retrieved.
pub fn todo_location(id: TodoId) -> String {
    format!("/todos/{id}")
}
