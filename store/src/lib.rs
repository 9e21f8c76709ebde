//! Record store for the todo service.
//!
//! # Overview
//! Holds todo records keyed by a store-assigned integer id. Two backends
//! implement the same `TodoStore` trait: an in-memory table for tests and
//! ephemeral runs, and a SQLite file for durable deployments.
//!
//! # Design
//! - Absence is data, not failure: lookups return `Ok(None)` and deletes
//!   return `Ok(false)` for unknown ids. `StoreError` is reserved for faults
//!   in the storage engine itself.
//! - Every operation touches a single record and completes inside one
//!   critical section, so callers never observe a partially applied write.
//! - Ids increase monotonically and are never reused, including after the
//!   highest id has been deleted.

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use memory::InMemoryTodoStore;
pub use sqlite::SqliteTodoStore;
pub use store::TodoStore;
pub use types::{NewTodo, Todo, TodoId, MAX_NAME_CHARS};
