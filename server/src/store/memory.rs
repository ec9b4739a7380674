//! Process-local store, for tests and throwaway runs.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use super::{StoreError, TodoStore};
use crate::model::{validate_priority, NewTodo, Todo};

#[derive(Debug, Default)]
pub struct InMemoryTodoStore {
    table: RwLock<Table>,
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Todo>,
    /// Highest id ever handed out; never decreases, so ids are not reused.
    last_id: i64,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Mirrors the table's `CHECK` constraint.
fn check_priority(priority: i64) -> Result<(), StoreError> {
    if validate_priority(priority) {
        Ok(())
    } else {
        Err(StoreError::Constraint(format!(
            "priority {priority} not in (1, 2, 3)"
        )))
    }
}

impl TodoStore for InMemoryTodoStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError> {
        check_priority(new.priority)?;
        let mut table = self.table.write().await;
        table.last_id += 1;
        let todo = new.with_id(table.last_id);
        table.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn update<F, E>(&self, id: i64, apply: F) -> Result<Option<Todo>, E>
    where
        F: FnOnce(Todo) -> Result<Todo, E> + Send,
        E: From<StoreError> + Send,
    {
        let mut table = self.table.write().await;
        let Some(current) = table.rows.get(&id).cloned() else {
            return Ok(None);
        };
        let merged = Todo { id, ..apply(current)? };
        check_priority(merged.priority)?;
        table.rows.insert(id, merged.clone());
        Ok(Some(merged))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            completed: false,
            description: String::new(),
            priority: 1,
        }
    }

    #[tokio::test]
    async fn ids_keep_growing_after_delete() {
        let store = InMemoryTodoStore::new();
        let a = store.create(new_todo("a")).await.unwrap();
        let b = store.create(new_todo("b")).await.unwrap();
        assert!(store.delete(b.id).await.unwrap());
        let c = store.create(new_todo("c")).await.unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    }

    #[tokio::test]
    async fn rejects_out_of_range_priority() {
        let store = InMemoryTodoStore::new();
        let err = store
            .create(NewTodo {
                priority: 0,
                ..new_todo("zero")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_that_breaks_the_constraint_is_not_written() {
        let store = InMemoryTodoStore::new();
        let todo = store.create(new_todo("a")).await.unwrap();
        let result: Result<Option<Todo>, StoreError> = store
            .update(todo.id, |current| Ok(Todo { priority: 7, ..current }))
            .await;
        assert!(matches!(result, Err(StoreError::Constraint(_))));
        assert_eq!(store.get(todo.id).await.unwrap(), Some(todo));
    }
}
