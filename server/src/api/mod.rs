//! HTTP surface of the todo service.
//!
//! Handlers only extract, delegate to `TodoService` and pick a status code.

pub mod error;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{json, Value};
use todo_store::TodoId;
use tower_http::trace::TraceLayer;

use crate::service::TodoService;
use crate::types::{CreateTodoRequest, TodoCompletionRequest, TodoResponse, UpdateTodoRequest};

pub use error::{ApiError, ProblemDetails};

/// Build the router over an already constructed service.
pub fn router(service: TodoService) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/{id}/status", patch(update_todo_status))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Todo API is running" }))
}

async fn list_todos(
    State(service): State<TodoService>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    Ok(Json(service.list().await?))
}

async fn get_todo(
    State(service): State<TodoService>,
    path: Result<Path<TodoId>, PathRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let Path(id) = path?;
    Ok(Json(service.get(id).await?))
}

async fn create_todo(
    State(service): State<TodoService>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let created = service.create(request).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created.location)],
        Json(created.todo),
    ))
}

async fn update_todo(
    State(service): State<TodoService>,
    path: Result<Path<TodoId>, PathRejection>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    Ok(Json(service.update(id, request).await?))
}

async fn update_todo_status(
    State(service): State<TodoService>,
    path: Result<Path<TodoId>, PathRejection>,
    payload: Result<Json<TodoCompletionRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    Ok(Json(service.update_completion(id, request).await?))
}

async fn delete_todo(
    State(service): State<TodoService>,
    path: Result<Path<TodoId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
