use std::sync::Arc;

use todolist_core::{Todo, TodoId};
use todolist_infra::{
    AppConfig, InMemoryItemStore, PostgresItemStore, RepositoryError, StoreBackend, StoreError,
    TodoRepository,
};

/// Store wiring behind the HTTP handlers.
#[derive(Clone)]
pub enum AppServices {
    InMemory {
        todos: Arc<TodoRepository<Arc<InMemoryItemStore>>>,
    },
    Persistent {
        todos: Arc<TodoRepository<PostgresItemStore>>,
    },
}

impl AppServices {
    /// Fresh, empty in-memory store (dev/test).
    pub fn in_memory() -> Self {
        Self::with_in_memory_store(Arc::new(InMemoryItemStore::new()))
    }

    /// In-memory wiring around a caller-held store (lets tests inspect it).
    pub fn with_in_memory_store(store: Arc<InMemoryItemStore>) -> Self {
        AppServices::InMemory {
            todos: Arc::new(TodoRepository::new(store)),
        }
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        match &config.store {
            StoreBackend::InMemory => {
                tracing::info!("using in-memory item store");
                Ok(Self::in_memory())
            }
            StoreBackend::Postgres { database_url } => {
                tracing::info!(collection = %config.collection, "using postgres item store");
                let store = PostgresItemStore::connect(database_url, config.collection.clone()).await?;
                Ok(AppServices::Persistent {
                    todos: Arc::new(TodoRepository::new(store)),
                })
            }
        }
    }

    pub async fn list_todos(&self) -> Result<Vec<Todo>, RepositoryError> {
        match self {
            AppServices::InMemory { todos } => todos.list().await,
            AppServices::Persistent { todos } => todos.list().await,
        }
    }

    pub async fn create_todo(&self, title: &str, description: &str) -> Result<Todo, RepositoryError> {
        match self {
            AppServices::InMemory { todos } => todos.create(title, description).await,
            AppServices::Persistent { todos } => todos.create(title, description).await,
        }
    }

    pub async fn update_todo(
        &self,
        id: &TodoId,
        title: &str,
        description: &str,
        completed: bool,
    ) -> Result<Todo, RepositoryError> {
        match self {
            AppServices::InMemory { todos } => todos.update(id, title, description, completed).await,
            AppServices::Persistent { todos } => {
                todos.update(id, title, description, completed).await
            }
        }
    }

    pub async fn delete_todo(&self, id: &TodoId) -> Result<(), RepositoryError> {
        match self {
            AppServices::InMemory { todos } => todos.delete(id).await,
            AppServices::Persistent { todos } => todos.delete(id).await,
        }
    }
}
