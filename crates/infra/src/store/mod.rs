//! Item store: the document collection holding to-do records.
//!
//! The repository depends only on the five primitives of [`ItemStore`] and
//! their success/failure signal. A store instance is bound to a single
//! collection (table) at construction.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use thiserror::Error;
use todolist_core::{Todo, TodoId};

pub use in_memory::InMemoryItemStore;
pub use postgres::PostgresItemStore;

/// A stored record. Same shape as the wire item.
pub type TodoRecord = Todo;

/// Record to insert; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: String,
}

/// Mutable fields overwritten by `update_by_id`. `id` and `created_at` are
/// immutable and deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Fields that support exact-match queries.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
        }
    }

    pub(crate) fn value_of<'a>(&self, record: &'a TodoRecord) -> &'a str {
        match self {
            Field::Title => &record.title,
            Field::Description => &record.description,
        }
    }
}

/// Item store operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached or the operation failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A store-level uniqueness constraint rejected the write.
    #[error("unique constraint violated on {0}")]
    UniqueViolation(String),

    /// A stored row could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Document-collection primitives consumed by the data access layer.
#[async_trait::async_trait]
pub trait ItemStore: Send + Sync {
    /// All records, in the store's own order.
    async fn list_all(&self) -> Result<Vec<TodoRecord>, StoreError>;

    /// Insert a record and return its store-assigned id.
    async fn insert(&self, record: NewTodo) -> Result<TodoId, StoreError>;

    /// Records whose `field` equals `value` exactly, optionally excluding one id.
    async fn query_by_field(
        &self,
        field: Field,
        value: &str,
        exclude: Option<&TodoId>,
    ) -> Result<Vec<TodoRecord>, StoreError>;

    /// Overwrite the mutable fields of `id`.
    ///
    /// Returns the record as stored after the write, or `None` when no record
    /// has that id.
    async fn update_by_id(
        &self,
        id: &TodoId,
        patch: TodoPatch,
    ) -> Result<Option<TodoRecord>, StoreError>;

    /// Remove `id`. Removing an absent id is not an error.
    async fn delete_by_id(&self, id: &TodoId) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    async fn list_all(&self) -> Result<Vec<TodoRecord>, StoreError> {
        (**self).list_all().await
    }

    async fn insert(&self, record: NewTodo) -> Result<TodoId, StoreError> {
        (**self).insert(record).await
    }

    async fn query_by_field(
        &self,
        field: Field,
        value: &str,
        exclude: Option<&TodoId>,
    ) -> Result<Vec<TodoRecord>, StoreError> {
        (**self).query_by_field(field, value, exclude).await
    }

    async fn update_by_id(
        &self,
        id: &TodoId,
        patch: TodoPatch,
    ) -> Result<Option<TodoRecord>, StoreError> {
        (**self).update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: &TodoId) -> Result<(), StoreError> {
        (**self).delete_by_id(id).await
    }
}
