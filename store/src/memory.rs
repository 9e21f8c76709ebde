//! In-memory store backend.
//!
//! # Design
//! A single `tokio::sync::RwLock` guards an ordered map plus the id counter.
//! Readers share the lock; every write runs inside one exclusive section.
//! The `BTreeMap` keeps `list` ordered by id without a sort.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::TodoStore;
use crate::types::{NewTodo, Todo, TodoId};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<TodoId, Todo>,
    last_id: TodoId,
}

/// Volatile store; cloning shares the same underlying table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let todo = todo.into_todo(table.last_id);
        table.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn update(
        &self,
        id: TodoId,
        name: String,
        is_complete: bool,
    ) -> Result<Option<Todo>, StoreError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|todo| {
            todo.name = name;
            todo.is_complete = is_complete;
            todo.clone()
        }))
    }

    async fn update_completion(
        &self,
        id: TodoId,
        is_complete: bool,
    ) -> Result<Option<Todo>, StoreError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|todo| {
            todo.is_complete = is_complete;
            todo.clone()
        }))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn ids_start_at_one() {
        let store = InMemoryTodoStore::new();
        let todo = store.insert(NewTodo::new("First", false, Utc::now())).await.unwrap();
        assert_eq!(todo.id, 1);
    }

    #[tokio::test]
    async fn clones_share_the_table() {
        let store = InMemoryTodoStore::new();
        let other = store.clone();
        let todo = store.insert(NewTodo::new("Shared", false, Utc::now())).await.unwrap();
        assert_eq!(other.get(todo.id).await.unwrap(), Some(todo));
    }

    #[tokio::test]
    async fn deleting_highest_id_does_not_recycle_it() {
        let store = InMemoryTodoStore::new();
        let first = store.insert(NewTodo::new("a", false, Utc::now())).await.unwrap();
        let second = store.insert(NewTodo::new("b", false, Utc::now())).await.unwrap();
        assert!(store.delete(second.id).await.unwrap());
        let third = store.insert(NewTodo::new("c", false, Utc::now())).await.unwrap();
        assert!(third.id > second.id);
        assert!(second.id > first.id);
    }
}
