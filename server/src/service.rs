//! Transport-independent todo operations.
//!
//! # Design
//! `TodoService` validates request shapes, stamps creation time, calls the
//! injected store and shapes records into `TodoResponse`. It knows nothing
//! about HTTP; the `api` module maps `ServiceError` onto status codes.
//!
//! Full updates validate the body before looking up the id, so an invalid
//! body for a missing id reports the validation failure.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use todo_store::{NewTodo, StoreError, TodoId, TodoStore};

use crate::types::{
    todo_location, CreateTodoRequest, TodoCompletionRequest, TodoResponse, UpdateTodoRequest,
};
use crate::validation::{validate_name, ValidationErrors};

/// Failures surfaced to callers of `TodoService`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("todo {0} was not found")]
    NotFound(TodoId),

    #[error("store failure: {0}")]
    Internal(#[from] StoreError),
}

/// Result of a successful create: the record plus where to fetch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub todo: TodoResponse,
    pub location: String,
}

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<TodoResponse>, ServiceError> {
        let todos = self.store.list().await?;
        tracing::debug!(count = todos.len(), "listed todos");
        Ok(todos.into_iter().map(TodoResponse::from).collect())
    }

    pub async fn get(&self, id: TodoId) -> Result<TodoResponse, ServiceError> {
        self.store
            .get(id)
            .await?
            .map(TodoResponse::from)
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, request: CreateTodoRequest) -> Result<Created, ServiceError> {
        let name = validate_name(request.name.as_deref())
            .inspect_err(|errors| tracing::debug!(%errors, "rejected create request"))?;

        let todo = self
            .store
            .insert(NewTodo::new(name, request.is_complete, Utc::now()))
            .await?;
        tracing::debug!(id = todo.id, "created todo");

        Ok(Created {
            location: todo_location(todo.id),
            todo: todo.into(),
        })
    }

    pub async fn update(
        &self,
        id: TodoId,
        request: UpdateTodoRequest,
    ) -> Result<TodoResponse, ServiceError> {
        let name = validate_name(request.name.as_deref())
            .inspect_err(|errors| tracing::debug!(id, %errors, "rejected update request"))?;

        let todo = self
            .store
            .update(id, name, request.is_complete)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::debug!(id, "updated todo");
        Ok(todo.into())
    }

    /// Set the completion flag only; `name` and `created_at` are untouched.
    pub async fn update_completion(
        &self,
        id: TodoId,
        request: TodoCompletionRequest,
    ) -> Result<TodoResponse, ServiceError> {
        let todo = self
            .store
            .update_completion(id, request.is_complete)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::debug!(id, is_complete = todo.is_complete, "updated todo completion");
        Ok(todo.into())
    }

    pub async fn delete(&self, id: TodoId) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::debug!(id, "deleted todo");
        Ok(())
    }
}

fn not_found(id: TodoId) -> ServiceError {
    tracing::debug!(id, "todo not found");
    ServiceError::NotFound(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{NAME_BLANK, NAME_FIELD, NAME_REQUIRED};
    use chrono::Duration;
    use todo_store::{InMemoryTodoStore, SqliteTodoStore};

    fn service() -> TodoService {
        TodoService::new(Arc::new(InMemoryTodoStore::new()))
    }

    fn create_request(name: &str, is_complete: bool) -> CreateTodoRequest {
        CreateTodoRequest {
            name: Some(name.to_string()),
            is_complete,
        }
    }

    #[tokio::test]
    async fn create_trims_and_stamps_the_record() {
        let service = service();
        let before = Utc::now();
        let created = service
            .create(create_request("  Trimmed Task  ", false))
            .await
            .unwrap();

        assert_eq!(created.todo.name, "Trimmed Task");
        assert!(!created.todo.is_complete);
        assert_eq!(created.location, format!("/todos/{}", created.todo.id));
        let drift = created.todo.created_at - before;
        assert!(drift > Duration::seconds(-1) && drift < Duration::seconds(5));
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let service = service();
        let created = service.create(create_request("Task", true)).await.unwrap();
        let fetched = service.get(created.todo.id).await.unwrap();
        assert_eq!(fetched, created.todo);
    }

    #[tokio::test]
    async fn created_ids_are_unique_and_listed() {
        let service = service();
        let a = service.create(create_request("a", false)).await.unwrap();
        let b = service.create(create_request("b", false)).await.unwrap();
        assert_ne!(a.todo.id, b.todo.id);

        let listed = service.list().await.unwrap();
        assert_eq!(listed, vec![a.todo, b.todo]);
    }

    #[tokio::test]
    async fn create_rejects_blank_names_whatever_the_flag() {
        let service = service();
        for is_complete in [false, true] {
            let err = service.create(create_request("   ", is_complete)).await.unwrap_err();
            let ServiceError::Validation(errors) = err else {
                panic!("expected validation error, got {err:?}");
            };
            assert_eq!(errors.messages(NAME_FIELD), [NAME_BLANK]);
        }
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_missing_name() {
        let err = service()
            .create(CreateTodoRequest::default())
            .await
            .unwrap_err();
        let ServiceError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.messages(NAME_FIELD), [NAME_REQUIRED]);
    }

    #[tokio::test]
    async fn update_keeps_created_at() {
        let service = service();
        let created = service.create(create_request("Original", false)).await.unwrap();
        let updated = service
            .update(
                created.todo.id,
                UpdateTodoRequest {
                    name: Some("  Updated Name ".to_string()),
                    is_complete: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Updated Name");
        assert!(updated.is_complete);
        assert_eq!(updated.created_at, created.todo.created_at);
    }

    #[tokio::test]
    async fn update_validates_before_lookup() {
        let err = service()
            .update(
                999,
                UpdateTodoRequest {
                    name: Some(String::new()),
                    is_complete: false,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let err = service()
            .update(
                999,
                UpdateTodoRequest {
                    name: Some("Updated".to_string()),
                    is_complete: false,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(999)));
    }

    #[tokio::test]
    async fn completion_patch_changes_only_the_flag() {
        let service = service();
        let created = service.create(create_request("Task", false)).await.unwrap();
        let patched = service
            .update_completion(created.todo.id, TodoCompletionRequest { is_complete: true })
            .await
            .unwrap();
        assert_eq!(patched.name, "Task");
        assert_eq!(patched.created_at, created.todo.created_at);
        assert!(patched.is_complete);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let service = service();
        let created = service.create(create_request("To Delete", false)).await.unwrap();
        service.delete(created.todo.id).await.unwrap();
        let err = service.delete(created.todo.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(id) if id == created.todo.id));
        assert!(matches!(
            service.get(created.todo.id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn works_against_sqlite() {
        let service = TodoService::new(Arc::new(SqliteTodoStore::open_in_memory().await.unwrap()));
        let created = service.create(create_request(" Durable ", false)).await.unwrap();
        assert_eq!(service.get(created.todo.id).await.unwrap(), created.todo);
    }
}
