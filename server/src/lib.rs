//! Todo record-keeping service.
//!
//! # Overview
//! Serves create, list, fetch, update, completion patch and delete for todo
//! records over HTTP/JSON, backed by any `todo_store::TodoStore`.
//!
//! # Design
//! - `service::TodoService` owns validation and response shaping and is
//!   usable without HTTP.
//! - `api` is a thin axum layer mapping `ServiceError` to status codes.
//! - The store is injected at construction; there is no global state, so
//!   each test builds its own isolated app.

pub mod api;
pub mod config;
pub mod service;
pub mod types;
pub mod validation;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use todo_store::{InMemoryTodoStore, TodoStore};

pub use config::{ConfigError, ServerConfig, StoreKind};
pub use service::{ServiceError, TodoService};
pub use types::{CreateTodoRequest, TodoCompletionRequest, TodoResponse, UpdateTodoRequest};

/// Router over a fresh in-memory store.
pub fn app() -> Router {
    app_with_store(Arc::new(InMemoryTodoStore::new()))
}

pub fn app_with_store(store: Arc<dyn TodoStore>) -> Router {
    api::router(TodoService::new(store))
}

/// Serve `router` until Ctrl+C or SIGTERM.
pub async fn run(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
