//! Process configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `HOST`: bind address (default: `127.0.0.1`)
//! - `PORT`: bind port (default: `3000`)
//! - `TODO_STORE`: `memory` (default) | `sqlite`
//! - `TODO_DATABASE_PATH`: SQLite file (default: `todos.db`, used when `TODO_STORE=sqlite`)

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use todo_store::{InMemoryTodoStore, SqliteTodoStore, StoreError, TodoStore};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_PATH: &str = "todos.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("invalid TODO_STORE value: {0} (expected `memory` or `sqlite`)")]
    InvalidStoreKind(String),
}

/// Which backend to open at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Memory,
    Sqlite,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "memory" | "in_memory" | "inmemory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(ConfigError::InvalidStoreKind(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreKind,
    pub database_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store: StoreKind::default(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }
        if let Some(kind) = get("TODO_STORE") {
            config.store = kind.parse()?;
        }
        if let Some(path) = get("TODO_DATABASE_PATH") {
            config.database_path = PathBuf::from(path);
        }
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub async fn open_store(&self) -> Result<Arc<dyn TodoStore>, StoreError> {
        Ok(match self.store {
            StoreKind::Memory => Arc::new(InMemoryTodoStore::new()),
            StoreKind::Sqlite => Arc::new(SqliteTodoStore::open(&self.database_path).await?),
        })
    }
}
