//! Request handlers for the `/todos` resource.
//!
//! Each handler validates its input through the model, performs a single
//! store operation and shapes the response. Handlers are generic over the
//! store so the same code runs against SQLite and the in-memory backend.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::ApiError;
use crate::extract::{JsonObject, TodoId};
use crate::model::{CreateTodo, ErrorBody, MessageBody, Todo, UpdateTodo};
use crate::store::TodoStore;

/// Router state: the injected record store.
pub struct AppState<S> {
    pub store: Arc<S>,
}

impl<S> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

// Derived `Clone` would demand `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

/// List every todo item.
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    responses(
        (status = 200, description = "A list of TODO items", body = [Todo]),
    )
)]
pub async fn list_todos<S: TodoStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.store.list().await?;
    Ok(Json(todos))
}

/// Create a todo item.
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = CreateTodo,
    responses(
        (status = 201, description = "The created TODO item", body = Todo),
        (status = 400, description = "Title missing or priority invalid", body = ErrorBody),
    )
)]
pub async fn create_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    JsonObject(input): JsonObject<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let new = input.into_new_todo()?;
    let todo = state.store.create(new).await?;
    tracing::info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Fetch one todo item.
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "The TODO item's ID")),
    responses(
        (status = 200, description = "The requested TODO item", body = Todo),
        (status = 404, description = "TODO item not found", body = ErrorBody),
    )
)]
pub async fn get_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    TodoId(id): TodoId,
) -> Result<Json<Todo>, ApiError> {
    match state.store.get(id).await? {
        Some(todo) => Ok(Json(todo)),
        None => {
            tracing::debug!(id, "todo not found");
            Err(ApiError::NotFound)
        }
    }
}

/// Partially update a todo item. Fields missing from the body keep their
/// stored values.
///
/// The body is extracted as a `Result` so that a missing record is reported
/// before anything about the body, malformed or not.
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "The TODO item's ID")),
    request_body = UpdateTodo,
    responses(
        (status = 200, description = "The updated TODO item", body = Todo),
        (status = 400, description = "Priority must be 1, 2, or 3", body = ErrorBody),
        (status = 404, description = "TODO item not found", body = ErrorBody),
    )
)]
pub async fn update_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    TodoId(id): TodoId,
    body: Result<JsonObject<UpdateTodo>, ApiError>,
) -> Result<Json<Todo>, ApiError> {
    let updated = state
        .store
        .update(id, move |current| {
            let JsonObject(input) = body?;
            input.apply(current)
        })
        .await?;

    match updated {
        Some(todo) => {
            tracing::info!(id, "todo updated");
            Ok(Json(todo))
        }
        None => {
            tracing::debug!(id, "todo not found");
            Err(ApiError::NotFound)
        }
    }
}

/// Delete a todo item.
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "The TODO item's ID")),
    responses(
        (status = 200, description = "Confirmation message", body = MessageBody),
        (status = 404, description = "TODO item not found", body = ErrorBody),
    )
)]
pub async fn delete_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    TodoId(id): TodoId,
) -> Result<Json<MessageBody>, ApiError> {
    if !state.store.delete(id).await? {
        tracing::debug!(id, "todo not found");
        return Err(ApiError::NotFound);
    }
    tracing::info!(id, "todo deleted");
    Ok(Json(MessageBody {
        message: "ToDo item deleted".to_string(),
    }))
}
