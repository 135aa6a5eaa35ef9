//! Data access layer: list/create/update/delete over an [`ItemStore`].
//!
//! Create and update run a uniqueness pre-check query before writing. The
//! check and the write are two separate store calls; the store's own unique
//! constraint closes the window between them, and a rejected write surfaces
//! as [`RepositoryError::DuplicateTitle`] exactly like a failed pre-check.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, instrument, warn};

use todolist_core::{format_timestamp, DomainError, Title, Todo, TodoId};

use crate::store::{Field, ItemStore, NewTodo, StoreError, TodoPatch};

/// Data access failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Input rejected before touching the store.
    #[error("{0}")]
    Validation(String),

    /// Another live item already has this title.
    #[error("A todo with the same title already exists.")]
    DuplicateTitle(String),

    /// No item with this id (update only; delete never reports it).
    #[error("todo {0} not found")]
    NotFound(TodoId),

    /// The store failed; not retried.
    #[error("{0}")]
    StoreUnavailable(StoreError),
}

impl From<StoreError> for RepositoryError {
    fn from(value: StoreError) -> Self {
        RepositoryError::StoreUnavailable(value)
    }
}

impl From<DomainError> for RepositoryError {
    fn from(value: DomainError) -> Self {
        RepositoryError::Validation(value.message().to_string())
    }
}

/// Translates item operations into store primitives.
#[derive(Debug)]
pub struct TodoRepository<S> {
    store: S,
    clock: fn() -> DateTime<Utc>,
}

impl<S: ItemStore> TodoRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Utc::now,
        }
    }

    /// Use a fixed clock for `createdAt` stamping (tests).
    pub fn with_clock(store: S, clock: fn() -> DateTime<Utc>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All items in store order; no sorting, dedupe or filtering.
    #[instrument(skip(self), err)]
    pub async fn list(&self) -> Result<Vec<Todo>, RepositoryError> {
        Ok(self.store.list_all().await?)
    }

    #[instrument(skip(self, description), err)]
    pub async fn create(&self, title: &str, description: &str) -> Result<Todo, RepositoryError> {
        let title = Title::parse(title)?;

        let existing = self
            .store
            .query_by_field(Field::Title, title.as_str(), None)
            .await?;
        if !existing.is_empty() {
            warn!(title = %title, "rejecting create: duplicate title");
            return Err(RepositoryError::DuplicateTitle(title.into_string()));
        }

        let record = NewTodo {
            title: title.as_str().to_string(),
            description: description.to_string(),
            completed: false,
            created_at: format_timestamp((self.clock)()),
        };
        let created_at = record.created_at.clone();

        let id = match self.store.insert(record).await {
            Ok(id) => id,
            Err(StoreError::UniqueViolation(_)) => {
                warn!(title = %title, "rejecting create: store unique constraint");
                return Err(RepositoryError::DuplicateTitle(title.into_string()));
            }
            Err(e) => return Err(e.into()),
        };

        info!(id = %id, "todo created");
        Ok(Todo {
            id,
            title: title.into_string(),
            description: description.to_string(),
            completed: false,
            created_at,
        })
    }

    /// Overwrite title, description and completion of `id`.
    ///
    /// The returned item is the record as stored, so `created_at` carries the
    /// original creation time.
    #[instrument(skip(self, description), fields(id = %id), err)]
    pub async fn update(
        &self,
        id: &TodoId,
        title: &str,
        description: &str,
        completed: bool,
    ) -> Result<Todo, RepositoryError> {
        let title = Title::parse(title)?;

        let others = self
            .store
            .query_by_field(Field::Title, title.as_str(), Some(id))
            .await?;
        if !others.is_empty() {
            warn!(title = %title, "rejecting update: duplicate title");
            return Err(RepositoryError::DuplicateTitle(title.into_string()));
        }

        let patch = TodoPatch {
            title: title.as_str().to_string(),
            description: description.to_string(),
            completed,
        };

        match self.store.update_by_id(id, patch).await {
            Ok(Some(updated)) => {
                info!("todo updated");
                Ok(updated)
            }
            Ok(None) => Err(RepositoryError::NotFound(id.clone())),
            Err(StoreError::UniqueViolation(_)) => {
                Err(RepositoryError::DuplicateTitle(title.into_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Unconditional delete; a missing id is not an error.
    #[instrument(skip(self), fields(id = %id), err)]
    pub async fn delete(&self, id: &TodoId) -> Result<(), RepositoryError> {
        self.store.delete_by_id(id).await?;
        info!("todo deleted");
        Ok(())
    }
}
