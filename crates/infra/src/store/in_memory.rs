use std::sync::RwLock;

use todolist_core::TodoId;

use super::{Field, ItemStore, NewTodo, StoreError, TodoPatch, TodoRecord};

/// In-memory item store.
///
/// Intended for tests/dev. Records keep insertion order, which is the order
/// `list_all` returns. Title uniqueness is checked under the write lock, so
/// two concurrent inserts with the same title cannot both land.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    records: RwLock<Vec<TodoRecord>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("lock poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list_all(&self) -> Result<Vec<TodoRecord>, StoreError> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.clone())
    }

    async fn insert(&self, record: NewTodo) -> Result<TodoId, StoreError> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;

        if records.iter().any(|r| r.title == record.title) {
            return Err(StoreError::UniqueViolation(Field::Title.as_str().to_string()));
        }

        let id = TodoId::generate();
        records.push(TodoRecord {
            id: id.clone(),
            title: record.title,
            description: record.description,
            completed: record.completed,
            created_at: record.created_at,
        });
        Ok(id)
    }

    async fn query_by_field(
        &self,
        field: Field,
        value: &str,
        exclude: Option<&TodoId>,
    ) -> Result<Vec<TodoRecord>, StoreError> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records
            .iter()
            .filter(|r| field.value_of(r) == value)
            .filter(|r| exclude.is_none_or(|id| r.id != *id))
            .cloned()
            .collect())
    }

    async fn update_by_id(
        &self,
        id: &TodoId,
        patch: TodoPatch,
    ) -> Result<Option<TodoRecord>, StoreError> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;

        if records.iter().any(|r| r.id != *id && r.title == patch.title) {
            return Err(StoreError::UniqueViolation(Field::Title.as_str().to_string()));
        }

        let Some(record) = records.iter_mut().find(|r| r.id == *id) else {
            return Ok(None);
        };
        record.title = patch.title;
        record.description = patch.description;
        record.completed = patch.completed;
        Ok(Some(record.clone()))
    }

    async fn delete_by_id(&self, id: &TodoId) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        records.retain(|r| r.id != *id);
        Ok(())
    }
}
