//! Client state controller.
//!
//! Every mutation goes to the server first; local state changes only with
//! the server's confirmed response. A failed call leaves the list untouched.

use tracing::{error, info, warn};

use todolist_core::{Todo, TodoId};

use crate::error::ClientError;
use crate::state::{NotificationLevel, TodoListState};
use crate::transport::TodoTransport;

pub struct TodoController<T> {
    transport: T,
    state: TodoListState,
}

impl<T: TodoTransport> TodoController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: TodoListState::new(),
        }
    }

    pub fn state(&self) -> &TodoListState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut TodoListState {
        &mut self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the full list and replace local state with it.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.state.is_loading = true;
        let result = self.transport.fetch_todos().await;
        self.state.is_loading = false;

        match result {
            Ok(todos) => {
                info!(count = todos.len(), "loaded todos");
                self.state.replace_all(todos);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to fetch todos");
                self.state.fail("Failed to fetch todos");
                Err(e)
            }
        }
    }

    /// Create on the server, then append the confirmed item.
    pub async fn add_todo(&mut self, title: &str, description: &str) -> Result<Todo, ClientError> {
        match self.transport.add_todo(title, description).await {
            Ok(todo) => {
                self.state.append(todo.clone());
                self.state
                    .notify(NotificationLevel::Success, "Todo added successfully");
                Ok(todo)
            }
            Err(e) => {
                let message = match &e {
                    ClientError::DuplicateTitle => "Todo with the same title already exists",
                    _ => "Failed to add todo",
                };
                warn!(error = %e, "failed to add todo");
                self.state.fail(message);
                self.state.notify(NotificationLevel::Error, message);
                Err(e)
            }
        }
    }

    /// Local replace-by-id with an item the server already returned.
    pub fn update_todo(&mut self, id: &TodoId, updated: Todo) -> bool {
        let replaced = self.state.replace_by_id(id, updated);
        if !replaced {
            warn!(%id, "update for a todo that is not in the local list");
        }
        replaced
    }

    /// Edit-form submit: update on the server, then apply the response.
    pub async fn save_todo(
        &mut self,
        id: &TodoId,
        title: &str,
        description: &str,
        completed: bool,
    ) -> Result<Todo, ClientError> {
        match self
            .transport
            .update_todo(id, title, description, completed)
            .await
        {
            Ok(todo) => {
                self.update_todo(id, todo.clone());
                self.state
                    .notify(NotificationLevel::Success, "Todo updated successfully");
                Ok(todo)
            }
            Err(e) => {
                let message = match &e {
                    ClientError::DuplicateTitle => {
                        "Failed to update todo, this title already exists. Please try again."
                    }
                    _ => "Failed to update todo",
                };
                warn!(%id, error = %e, "failed to update todo");
                self.state.notify(NotificationLevel::Error, message);
                Err(e)
            }
        }
    }

    /// Flip `completed` on the server, then apply the response.
    pub async fn toggle_complete(&mut self, id: &TodoId) -> Result<Todo, ClientError> {
        let Some(current) = self.state.find(id).cloned() else {
            return Err(ClientError::UnknownTodo(id.clone()));
        };

        match self
            .transport
            .update_todo(id, &current.title, &current.description, !current.completed)
            .await
        {
            Ok(todo) => {
                self.update_todo(id, todo.clone());
                Ok(todo)
            }
            Err(e) => {
                error!(%id, error = %e, "failed to toggle todo completion");
                Err(e)
            }
        }
    }

    /// Delete on the server, then drop the item locally.
    pub async fn delete_todo(&mut self, id: &TodoId) -> Result<(), ClientError> {
        match self.transport.delete_todo(id).await {
            Ok(()) => {
                self.state.remove_by_id(id);
                Ok(())
            }
            Err(e) => {
                warn!(%id, error = %e, "failed to delete todo");
                Err(e)
            }
        }
    }
}
