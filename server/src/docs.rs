//! Generated OpenAPI document and the page that renders it.

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Json;
use utoipa::OpenApi;

use crate::handlers;
use crate::model::{CreateTodo, ErrorBody, MessageBody, Todo, UpdateTodo};

pub const DOCS_PATH: &str = "/apidocs";
pub const SPEC_PATH: &str = "/apispec_1.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "TODO API Server"),
    paths(
        handlers::list_todos,
        handlers::create_todo,
        handlers::get_todo,
        handlers::update_todo,
        handlers::delete_todo,
    ),
    components(schemas(Todo, CreateTodo, UpdateTodo, ErrorBody, MessageBody)),
    tags((name = "todos", description = "TODO item management"))
)]
pub struct ApiDoc;

const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>TODO API Server</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({ url: "/apispec_1.json", dom_id: "#swagger-ui" });
  </script>
</body>
</html>
"##;

/// `302 Found`, which `Redirect` has no constructor for.
pub async fn redirect_to_docs() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, DOCS_PATH)])
}

pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI)
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
