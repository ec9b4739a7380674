//! Extractors whose rejections render as `ApiError`s.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// `axum::Json` with `{"error": ...}` rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// A request body that must be a JSON object, deserialized into `T`.
///
/// A `null` body stands for `{}`. Arrays and scalars are rejected with 422,
/// so a struct is never filled in from a positional array.
#[derive(Debug)]
pub struct JsonObject<T>(pub T);

impl<S, T> FromRequest<S> for JsonObject<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AppJson(fields) =
            AppJson::<Option<Map<String, Value>>>::from_request(req, state).await?;
        let object = Value::Object(fields.unwrap_or_default());
        serde_json::from_value(object)
            .map(Self)
            .map_err(|err| ApiError::MalformedBody {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: format!(
                    "Failed to deserialize the JSON body into the target type: {err}"
                ),
            })
    }
}

/// The `{id}` path segment. A segment that is not an integer is reported as
/// a missing record.
#[derive(Debug, Clone, Copy, Deserialize, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct TodoId(pub i64);
