//! The store contract shared by every backend.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{NewTodo, Todo, TodoId};

/// Durable holder of todo records, addressable by integer id.
///
/// Handlers hold a store as `Arc<dyn TodoStore>`, so the trait stays object
/// safe. Each method is atomic at single-record granularity. `list` is not
/// isolated from concurrent writers and may or may not observe a write that
/// is in flight.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Assign a fresh id, persist the record and return it.
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError>;

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError>;

    /// All records, ascending by id. Recomputed on every call.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// Replace `name` and `is_complete`; `created_at` is left untouched.
    async fn update(
        &self,
        id: TodoId,
        name: String,
        is_complete: bool,
    ) -> Result<Option<Todo>, StoreError>;

    /// Replace `is_complete` only.
    async fn update_completion(
        &self,
        id: TodoId,
        is_complete: bool,
    ) -> Result<Option<Todo>, StoreError>;

    /// Returns `true` when a record was removed.
    async fn delete(&self, id: TodoId) -> Result<bool, StoreError>;
}
