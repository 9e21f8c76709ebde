use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_server::ServerConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "configuration error");
            std::process::exit(1);
        }
    };
    tracing::info!(store = ?config.store, path = %config.database_path.display(), "configuration loaded");

    let store = match config.open_store().await {
        Ok(store) => store,
        Err(error) => {
            tracing::error!(%error, "failed to open todo store");
            std::process::exit(1);
        }
    };

    let addr = config.bind_address();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "failed to bind {addr}");
            std::process::exit(1);
        }
    };
    tracing::info!("listening on {addr}");

    if let Err(error) = todo_server::run(listener, todo_server::app_with_store(store)).await {
        tracing::error!(%error, "server error");
        std::process::exit(1);
    }
    tracing::info!("server shutdown complete");
}
