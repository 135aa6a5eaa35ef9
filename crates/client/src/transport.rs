//! HTTP access to the `/api/todo` endpoint.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use todolist_core::{Todo, TodoId};

use crate::error::ClientError;

/// Server message for a title collision. Servers running the legacy error
/// policy send it with a 500 instead of a 409.
const DUPLICATE_TITLE_MESSAGE: &str = "A todo with the same title already exists.";

/// The four calls the controller makes against the server.
#[async_trait]
pub trait TodoTransport: Send + Sync {
    async fn fetch_todos(&self) -> Result<Vec<Todo>, ClientError>;

    async fn add_todo(&self, title: &str, description: &str) -> Result<Todo, ClientError>;

    async fn update_todo(
        &self,
        id: &TodoId,
        title: &str,
        description: &str,
        completed: bool,
    ) -> Result<Todo, ClientError>;

    async fn delete_todo(&self, id: &TodoId) -> Result<(), ClientError>;
}

pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// `base_url` is the server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn todo_url(&self) -> String {
        format!("{}/api/todo", self.base_url)
    }

    /// Check connectivity by hitting the health endpoint.
    pub async fn check_connectivity(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

async fn read_json<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return resp.json().await.map_err(|e| ClientError::Parse(e.to_string()));
    }
    Err(error_from_response(status, resp).await)
}

async fn error_from_response(status: StatusCode, resp: reqwest::Response) -> ClientError {
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or(text);

    if status == StatusCode::CONFLICT || message == DUPLICATE_TITLE_MESSAGE {
        ClientError::DuplicateTitle
    } else {
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn network(e: reqwest::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

#[async_trait]
impl TodoTransport for HttpTransport {
    async fn fetch_todos(&self) -> Result<Vec<Todo>, ClientError> {
        let resp = self.client.get(self.todo_url()).send().await.map_err(network)?;
        read_json(resp).await
    }

    async fn add_todo(&self, title: &str, description: &str) -> Result<Todo, ClientError> {
        let resp = self
            .client
            .post(self.todo_url())
            .json(&json!({ "title": title, "description": description }))
            .send()
            .await
            .map_err(network)?;
        read_json(resp).await
    }

    async fn update_todo(
        &self,
        id: &TodoId,
        title: &str,
        description: &str,
        completed: bool,
    ) -> Result<Todo, ClientError> {
        let resp = self
            .client
            .put(self.todo_url())
            .json(&json!({
                "id": id,
                "title": title,
                "description": description,
                "completed": completed,
            }))
            .send()
            .await
            .map_err(network)?;
        read_json(resp).await
    }

    async fn delete_todo(&self, id: &TodoId) -> Result<(), ClientError> {
        let resp = self
            .client
            .delete(self.todo_url())
            .json(&json!({ "id": id }))
            .send()
            .await
            .map_err(network)?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(error_from_response(status, resp).await)
        }
    }
}
