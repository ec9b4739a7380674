//! Errors returned by request handlers and their HTTP mapping.
//!
//! Every error renders as `{"error": "<message>"}`. Client-facing messages
//! are fixed strings that callers match on; store failures are logged in
//! full and reported with a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::model::ErrorBody;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Priority must be 1, 2, or 3")]
    InvalidPriority,

    #[error("ToDo item not found")]
    NotFound,

    /// The request body was not a JSON object of the expected shape.
    #[error("{message}")]
    MalformedBody { status: StatusCode, message: String },

    #[error("Internal server error")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::TitleRequired | Self::InvalidPriority => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MalformedBody { status, .. } => *status,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Ids that do not parse as integers cannot name a record.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(%rejection, "unroutable todo id");
        Self::NotFound
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store(source) = &self {
            tracing::error!(error = %source, "record store failure");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
