//! Synchronous client core for the todo service.
//!
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network; the caller executes the round-trip. This keeps the
//! client deterministic and lets any transport (blocking, async, foreign)
//! drive it.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, DeleteConfirmation, Todo, UpdateTodo};
