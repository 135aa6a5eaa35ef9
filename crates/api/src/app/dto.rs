use serde::Deserialize;
use serde::de::DeserializeOwned;

use axum::http::StatusCode;

use todolist_core::{Todo, TodoId};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

// Every field is optional so that presence checks produce the endpoint's own
// 400 messages instead of a generic deserialization failure.

#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteTodoRequest {
    pub id: Option<String>,
}

/// Decode a JSON request body. An empty body decodes as `T::default()`.
pub fn parse_body<T>(body: &[u8]) -> Result<T, axum::response::Response>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting malformed request body");
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_json",
            format!("Invalid JSON body: {e}"),
        )
    })
}

/// Non-blank string field, or `None`.
pub fn required(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.trim().is_empty())
}

// -------------------------
// Response mapping
// -------------------------

/// DELETE acknowledgement: the id with every other field empty.
pub fn deleted_todo_ack(id: TodoId) -> Todo {
    Todo {
        id,
        title: String::new(),
        description: String::new(),
        completed: false,
        created_at: String::new(),
    }
}
