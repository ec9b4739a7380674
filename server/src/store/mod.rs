//! Record store capability for todo items.
//!
//! # Design
//! Handlers never see a connection or a global handle: they receive a
//! `TodoStore` through router state. Each method is one unit of work. The
//! SQLite backend runs writes inside a transaction that rolls back when it
//! is dropped uncommitted, so an early return (not found, validation error,
//! query failure) releases the session without writing. The in-memory
//! backend gets the same effect by holding its write lock for the whole
//! operation.

use std::future::Future;

use thiserror::Error;

use crate::model::{NewTodo, Todo};

mod memory;
mod sqlite;

pub use memory::InMemoryTodoStore;
pub use sqlite::SqliteTodoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A record violated a storage-level constraint.
    #[error("constraint violated: {0}")]
    Constraint(String),
}

pub trait TodoStore: Send + Sync + 'static {
    /// Every record, in whatever order the backend yields them.
    fn list(&self) -> impl Future<Output = Result<Vec<Todo>, StoreError>> + Send;

    /// Persist `new` under a freshly assigned id.
    fn create(&self, new: NewTodo) -> impl Future<Output = Result<Todo, StoreError>> + Send;

    fn get(&self, id: i64) -> impl Future<Output = Result<Option<Todo>, StoreError>> + Send;

    /// Read-modify-write of one record in a single transaction.
    ///
    /// Returns `Ok(None)` without calling `apply` when `id` does not exist.
    /// If `apply` fails the transaction is abandoned and its error returned.
    /// The written record always keeps `id`, whatever `apply` returns.
    fn update<F, E>(
        &self,
        id: i64,
        apply: F,
    ) -> impl Future<Output = Result<Option<Todo>, E>> + Send
    where
        F: FnOnce(Todo) -> Result<Todo, E> + Send,
        E: From<StoreError> + Send;

    /// Returns `false` when there was nothing to delete.
    fn delete(&self, id: i64) -> impl Future<Output = Result<bool, StoreError>> + Send;
}
