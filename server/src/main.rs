use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use todo_server::{app, Config, InMemoryTodoStore, SqliteTodoStore, StorageMode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    tracing::info!(storage_mode = ?config.storage_mode, "configuration loaded");

    let router = match config.storage_mode {
        StorageMode::Sqlite => app(SqliteTodoStore::connect(&config.database_url).await?),
        StorageMode::InMemory => app(InMemoryTodoStore::new()),
    };

    let listener = TcpListener::bind(config.socket_addr()).await?;
    todo_server::serve(listener, router).await?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("todo_server=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
