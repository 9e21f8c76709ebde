//! SQLite store backend.
//!
//! # Design
//! A single `tokio_rusqlite::Connection` owns the database on one background
//! thread. Every operation is a closure sent through `call`, so SQLite I/O
//! never runs on a runtime worker and concurrent callers queue on the
//! connection's channel instead of parking a worker on a lock.
//! Mutations use `RETURNING` so the write and the read-back of the affected
//! row happen in a single statement.
//!
//! `AUTOINCREMENT` keeps ids monotonic across deletes. Timestamps are stored
//! as RFC 3339 text with microsecond precision.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::StoreError;
use crate::store::TodoStore;
use crate::types::{NewTodo, Todo, TodoId};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS todos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL CHECK (length(name) <= 200),
    is_complete INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT    NOT NULL
);
";

const COLUMNS: &str = "id, name, is_complete, created_at";

/// Durable store backed by a SQLite database file. Clones share the
/// same background connection.
#[derive(Clone)]
pub struct SqliteTodoStore {
    conn: Connection,
}

impl fmt::Debug for SqliteTodoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteTodoStore").finish_non_exhaustive()
    }
}

impl SqliteTodoStore {
    /// Open (creating if needed) the database at `path` and ensure the schema.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).await?;
        tracing::debug!(path = %path.display(), "opened sqlite todo store");
        Self::with_connection(conn).await
    }

    /// A private in-memory database, discarded when the store is dropped.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory().await?).await
    }

    async fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;
        Ok(Self { conn })
    }
}

fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let raw: String = row.get(3)?;
    let created_at = DateTime::parse_from_rfc3339(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);
    Ok(Todo {
        id: row.get(0)?,
        name: row.get(1)?,
        is_complete: row.get(2)?,
        created_at,
    })
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let created_at = encode_timestamp(&todo.created_at);
        let todo = self
            .conn
            .call(move |conn| {
                let sql = format!(
                    "INSERT INTO todos (name, is_complete, created_at) VALUES (?1, ?2, ?3) RETURNING {COLUMNS}"
                );
                Ok(conn.query_row(&sql, params![todo.name, todo.is_complete, created_at], row_to_todo)?)
            })
            .await?;
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let todo = self
            .conn
            .call(move |conn| {
                let sql = format!("SELECT {COLUMNS} FROM todos WHERE id = ?1");
                Ok(conn.query_row(&sql, params![id], row_to_todo).optional()?)
            })
            .await?;
        Ok(todo)
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = self
            .conn
            .call(|conn| {
                let sql = format!("SELECT {COLUMNS} FROM todos ORDER BY id ASC");
                let mut stmt = conn.prepare(&sql)?;
                let todos = stmt
                    .query_map([], row_to_todo)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(todos)
            })
            .await?;
        Ok(todos)
    }

    async fn update(
        &self,
        id: TodoId,
        name: String,
        is_complete: bool,
    ) -> Result<Option<Todo>, StoreError> {
        let todo = self
            .conn
            .call(move |conn| {
                let sql = format!(
                    "UPDATE todos SET name = ?1, is_complete = ?2 WHERE id = ?3 RETURNING {COLUMNS}"
                );
                Ok(conn
                    .query_row(&sql, params![name, is_complete, id], row_to_todo)
                    .optional()?)
            })
            .await?;
        Ok(todo)
    }

    async fn update_completion(
        &self,
        id: TodoId,
        is_complete: bool,
    ) -> Result<Option<Todo>, StoreError> {
        let todo = self
            .conn
            .call(move |conn| {
                let sql =
                    format!("UPDATE todos SET is_complete = ?1 WHERE id = ?2 RETURNING {COLUMNS}");
                Ok(conn
                    .query_row(&sql, params![is_complete, id], row_to_todo)
                    .optional()?)
            })
            .await?;
        Ok(todo)
    }

    async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        let removed = self
            .conn
            .call(move |conn| Ok(conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?))
            .await?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_NAME_CHARS;

    #[tokio::test]
    async fn schema_rejects_overlong_names() {
        let store = SqliteTodoStore::open_in_memory().await.unwrap();
        let name = "x".repeat(MAX_NAME_CHARS + 1);
        let err = store.insert(NewTodo::new(name, false, Utc::now())).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn schema_accepts_names_at_the_bound() {
        let store = SqliteTodoStore::open_in_memory().await.unwrap();
        let name = "x".repeat(MAX_NAME_CHARS);
        let todo = store.insert(NewTodo::new(name.clone(), false, Utc::now())).await.unwrap();
        assert_eq!(todo.name, name);
    }

    #[test]
    fn timestamps_encode_with_microseconds() {
        let ts = DateTime::parse_from_rfc3339("2024-03-04T05:06:07.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(encode_timestamp(&ts), "2024-03-04T05:06:07.123456Z");
    }

    #[tokio::test]
    async fn reopening_a_file_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");
        let created = {
            let store = SqliteTodoStore::open(&path).await.unwrap();
            store.insert(NewTodo::new("Persist me", true, Utc::now())).await.unwrap()
        };
        let store = SqliteTodoStore::open(&path).await.unwrap();
        assert_eq!(store.get(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_writers_share_one_connection() {
        let store = SqliteTodoStore::open_in_memory().await.unwrap();
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(NewTodo::new(format!("task {i}"), false, Utc::now()))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
        assert_eq!(store.list().await.unwrap().len(), 16);
    }
}
