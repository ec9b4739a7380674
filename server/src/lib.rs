//! HTTP service for a single `todos` resource.
//!
//! # Overview
//! `app` builds the axum router around an injected [`TodoStore`]; `serve`
//! runs it on a listener. Five handlers cover list, create, get, update and
//! delete. Validation lives in [`model`], persistence behind the store
//! trait, and everything cross-cutting (CORS, request tracing) is a router
//! layer rather than handler code.

pub mod config;
pub mod docs;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod server;
pub mod store;

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub use config::{Config, StorageMode};
pub use error::ApiError;
pub use handlers::AppState;
pub use model::{CreateTodo, NewTodo, Todo, UpdateTodo};
pub use server::serve;
pub use store::{InMemoryTodoStore, SqliteTodoStore, StoreError, TodoStore};

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, X-Requested-With";

pub fn app<S: TodoStore>(store: S) -> Router {
    Router::new()
        .route("/", get(docs::redirect_to_docs))
        .route(docs::DOCS_PATH, get(docs::swagger_ui))
        .route(docs::SPEC_PATH, get(docs::openapi_json))
        .route(
            "/todos",
            get(handlers::list_todos::<S>).post(handlers::create_todo::<S>),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo::<S>)
                .put(handlers::update_todo::<S>)
                .delete(handlers::delete_todo::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .with_state(AppState::new(store))
}

/// Answers preflight requests. The `SetResponseHeaderLayer`s in `app` put
/// the same headers on every other response.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-requested-with")])
}
