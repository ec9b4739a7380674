//! The ToDo resource: stored record, request payloads, validation rules.
//!
//! # Design
//! `Todo` is a plain value type. It is what the store hands back and what
//! every endpoint serializes, so its `Serialize` impl *is* the external
//! representation. Request payloads are separate types whose fields are all
//! optional; presence rules and defaults are applied by `into_new_todo` and
//! `apply` rather than by serde, so the API can answer with its own error
//! messages instead of a deserializer's.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::ApiError;

/// Accepted priority levels.
pub const PRIORITIES: [i64; 3] = [1, 2, 3];

pub const DEFAULT_PRIORITY: i64 = 1;

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub description: String,
    #[schema(minimum = 1, maximum = 3)]
    pub priority: i64,
}

/// A validated record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub description: String,
    pub priority: i64,
}

impl NewTodo {
    /// Attach the id the store assigned.
    pub fn with_id(self, id: i64) -> Todo {
        Todo {
            id,
            title: self.title,
            completed: self.completed,
            description: self.description,
            priority: self.priority,
        }
    }
}

/// Request payload for `POST /todos`.
///
/// `title` is required but checked by presence only, so an empty string is
/// a valid title. Any `completed` field in the body is ignored; new items
/// always start incomplete.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateTodo {
    #[schema(example = "New Task")]
    pub title: Option<String>,
    #[schema(example = "This is a new task")]
    pub description: Option<String>,
    #[schema(value_type = Option<i64>, example = 1)]
    pub priority: Option<Value>,
}

impl CreateTodo {
    pub fn into_new_todo(self) -> Result<NewTodo, ApiError> {
        let title = self.title.ok_or(ApiError::TitleRequired)?;
        let priority = match self.priority {
            Some(value) => parse_priority(&value)?,
            None => DEFAULT_PRIORITY,
        };
        Ok(NewTodo {
            title,
            completed: false,
            description: self.description.unwrap_or_default(),
            priority,
        })
    }
}

/// Request payload for `PUT /todos/{id}`. Every field is optional; a field
/// left out (or sent as `null`) keeps its stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTodo {
    #[schema(example = "Updated Task")]
    pub title: Option<String>,
    #[schema(example = true)]
    pub completed: Option<bool>,
    pub description: Option<String>,
    #[schema(value_type = Option<i64>, example = 2)]
    pub priority: Option<Value>,
}

impl UpdateTodo {
    /// Merge this payload over `current`. Fails without touching anything if
    /// the priority is invalid.
    pub fn apply(self, current: Todo) -> Result<Todo, ApiError> {
        let priority = match self.priority {
            Some(value) => parse_priority(&value)?,
            None => current.priority,
        };
        Ok(Todo {
            id: current.id,
            title: self.title.unwrap_or(current.title),
            completed: self.completed.unwrap_or(current.completed),
            description: self.description.unwrap_or(current.description),
            priority,
        })
    }
}

/// Body of error responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "ToDo item not found")]
    pub error: String,
}

/// Body of the delete confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "ToDo item deleted")]
    pub message: String,
}

pub fn validate_priority(value: i64) -> bool {
    PRIORITIES.contains(&value)
}

/// Only JSON integers are priorities; `2.0`, `"2"` and `true` are rejected.
fn parse_priority(value: &Value) -> Result<i64, ApiError> {
    value
        .as_i64()
        .filter(|priority| validate_priority(*priority))
        .ok_or(ApiError::InvalidPriority)
}
