//! Request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Every endpoint has a `build_*`
//! method producing an `HttpRequest` and a `parse_*` method consuming the
//! matching `HttpResponse`; the round-trip in between belongs to the caller.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, DeleteConfirmation, ErrorBody, Todo, UpdateTodo};

#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todos".to_string(), None)
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/todos/{id}"), None)
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Post, "/todos".to_string(), Some(body)))
    }

    pub fn build_update_todo(&self, id: i64, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Put, format!("/todos/{id}"), Some(body)))
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/todos/{id}"), None)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        expect_json(response, 200)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        expect_json(response, 200)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        expect_json(response, 201)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        expect_json(response, 200)
    }

    pub fn parse_delete_todo(
        &self,
        response: HttpResponse,
    ) -> Result<DeleteConfirmation, ApiError> {
        expect_json(response, 200)
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let headers = if body.is_some() {
            vec![("content-type".to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body,
        }
    }
}

fn to_json<T: Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn expect_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => {
            // Fall back to the raw body if the server did not send `{"error"}`.
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|body| body.error)
                .unwrap_or_else(|_| response.body.clone());
            Err(ApiError::BadRequest(message))
        }
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:5000")
    }

    const TODO_JSON: &str =
        r#"{"id":1,"title":"Test","completed":false,"description":"","priority":1}"#;

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:5000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_todo_produces_correct_request() {
        let req = client().build_get_todo(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:5000/todos/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_todo_omits_unset_fields() {
        let req = client().build_create_todo(&CreateTodo::new("Buy milk")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:5000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"title": "Buy milk"}));
    }

    #[test]
    fn build_create_todo_sends_optional_fields() {
        let input = CreateTodo {
            description: Some("semi-skimmed".to_string()),
            priority: Some(3),
            ..CreateTodo::new("Buy milk")
        };
        let req = client().build_create_todo(&input).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["description"], "semi-skimmed");
        assert_eq!(body["priority"], 3);
    }

    #[test]
    fn build_update_todo_sends_only_present_fields() {
        let input = UpdateTodo {
            completed: Some(true),
            ..UpdateTodo::default()
        };
        let req = client().build_update_todo(7, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:5000/todos/7");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"completed": true}));
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:5000/todos/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_todos_success() {
        let response = HttpResponse::new(200, format!("[{TODO_JSON}]"));
        let todos = client().parse_list_todos(response).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Test");
        assert_eq!(todos[0].priority, 1);
    }

    #[test]
    fn parse_get_todo_not_found() {
        let response = HttpResponse::new(404, r#"{"error":"ToDo item not found"}"#);
        let err = client().parse_get_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_todo_success() {
        let todo = client()
            .parse_create_todo(HttpResponse::new(201, TODO_JSON))
            .unwrap();
        assert_eq!(todo.id, 1);
        assert_eq!(todo.description, "");
    }

    #[test]
    fn parse_create_todo_bad_request_keeps_message() {
        let response = HttpResponse::new(400, r#"{"error":"Title is required"}"#);
        let err = client().parse_create_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Title is required"));
    }

    #[test]
    fn parse_bad_request_without_json_body() {
        let response = HttpResponse::new(400, "plain text");
        let err = client().parse_update_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "plain text"));
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let response = HttpResponse::new(500, "internal error");
        let err = client().parse_create_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_delete_todo_success() {
        let response = HttpResponse::new(200, r#"{"message":"ToDo item deleted"}"#);
        let confirmation = client().parse_delete_todo(response).unwrap();
        assert_eq!(confirmation.message, "ToDo item deleted");
    }

    #[test]
    fn parse_delete_todo_not_found() {
        let response = HttpResponse::new(404, r#"{"error":"ToDo item not found"}"#);
        let err = client().parse_delete_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:5000/");
        assert_eq!(client.build_list_todos().url, "http://localhost:5000/todos");
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let response = HttpResponse::new(200, "not json");
        let err = client().parse_list_todos(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
