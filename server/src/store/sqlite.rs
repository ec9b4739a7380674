//! SQLite-backed store using a `sqlx` connection pool.
//!
//! Schema lives in `migrations/` and is applied on connect. The `todos`
//! table carries its own `CHECK` on priority, so a record that slipped past
//! request validation is still refused here.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

use super::{StoreError, TodoStore};
use crate::model::{NewTodo, Todo};

const SELECT_TODOS: &str = "SELECT id, title, completed, description, priority FROM todos";
const SELECT_TODO_BY_ID: &str =
    "SELECT id, title, completed, description, priority FROM todos WHERE id = ?";

#[derive(Debug, Clone)]
pub struct SqliteTodoStore {
    pool: SqlitePool,
}

impl SqliteTodoStore {
    /// Open (creating if needed) the database at `database_url` and bring its
    /// schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool_options = if is_in_memory(database_url) {
            // Every connection to `:memory:` is its own empty database, so the
            // pool must keep exactly one alive.
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.migrate().await?;
        tracing::debug!(database_url, "sqlite store ready");
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Start a write transaction holding SQLite's write lock from the first
    /// statement. Competing writers wait out `busy_timeout` instead of failing
    /// when a read snapshot cannot be upgraded.
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, StoreError> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn classify(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_check_violation() => {
            StoreError::Constraint(db.message().to_string())
        }
        _ => StoreError::Database(err),
    }
}

impl TodoStore for SqliteTodoStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        sqlx::query_as::<_, Todo>(SELECT_TODOS)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let mut tx = self.begin_write().await?;
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (title, completed, description, priority) VALUES (?, ?, ?, ?) \
             RETURNING id, title, completed, description, priority",
        )
        .bind(new.title)
        .bind(new.completed)
        .bind(new.description)
        .bind(new.priority)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;
        tx.commit().await?;
        Ok(todo)
    }

    async fn get(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        sqlx::query_as::<_, Todo>(SELECT_TODO_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn update<F, E>(&self, id: i64, apply: F) -> Result<Option<Todo>, E>
    where
        F: FnOnce(Todo) -> Result<Todo, E> + Send,
        E: From<StoreError> + Send,
    {
        let mut tx = self.begin_write().await?;

        let current = sqlx::query_as::<_, Todo>(SELECT_TODO_BY_ID)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(classify)?;
        let Some(current) = current else {
            return Ok(None);
        };

        let merged = Todo { id, ..apply(current)? };
        sqlx::query(
            "UPDATE todos SET title = ?, completed = ?, description = ?, priority = ? WHERE id = ?",
        )
        .bind(&merged.title)
        .bind(merged.completed)
        .bind(&merged.description)
        .bind(merged.priority)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(classify)?;

        tx.commit().await.map_err(StoreError::from)?;
        Ok(Some(merged))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut tx = self.begin_write().await?;
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
