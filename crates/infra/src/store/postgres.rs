//! Postgres-backed item store.
//!
//! One table per collection. Title uniqueness is a `UNIQUE` constraint, so
//! the database rejects a colliding write even when two requests both passed
//! the repository's pre-check.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `UniqueViolation` |
//! | Database (other) | any other | `Unavailable` |
//! | PoolClosed / Io / Tls / timeouts | N/A | `Unavailable` |
//! | ColumnDecode / ColumnNotFound | N/A | `Corrupt` |

use std::sync::Arc;

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use todolist_core::TodoId;
use tracing::instrument;

use super::{Field, ItemStore, NewTodo, StoreError, TodoPatch, TodoRecord};

/// Postgres-backed item store bound to one table.
///
/// `PgPool` is `Send + Sync`; the store can be shared across request tasks.
#[derive(Debug, Clone)]
pub struct PostgresItemStore {
    pool: Arc<PgPool>,
    table: String,
}

impl PostgresItemStore {
    /// Wrap an existing pool. `table` must be a plain SQL identifier.
    pub fn new(pool: PgPool, table: impl Into<String>) -> Result<Self, StoreError> {
        let table = table.into();
        if !is_identifier(&table) {
            return Err(StoreError::Unavailable(format!(
                "invalid collection name '{table}'"
            )));
        }
        Ok(Self {
            pool: Arc::new(pool),
            table,
        })
    }

    /// Connect to `database_url`, bind to `table` and ensure the table exists.
    pub async fn connect(database_url: &str, table: impl Into<String>) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool, table)?;
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the collection table if it is missing (idempotent).
    #[instrument(skip(self), fields(table = %self.table), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                seq         BIGSERIAL,
                id          TEXT PRIMARY KEY,
                title       TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                completed   BOOLEAN NOT NULL DEFAULT FALSE,
                created_at  TEXT NOT NULL,
                CONSTRAINT {table}_title_key UNIQUE (title)
            )
            "#,
            table = self.table
        );
        sqlx::query(&ddl)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ItemStore for PostgresItemStore {
    #[instrument(skip(self), fields(table = %self.table), err)]
    async fn list_all(&self) -> Result<Vec<TodoRecord>, StoreError> {
        let sql = format!(
            "SELECT id, title, description, completed, created_at FROM {} ORDER BY seq ASC",
            self.table
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_all", e))?;

        rows.iter().map(record_from_row).collect()
    }

    #[instrument(skip(self, record), fields(table = %self.table), err)]
    async fn insert(&self, record: NewTodo) -> Result<TodoId, StoreError> {
        let id = TodoId::generate();
        let sql = format!(
            r#"
            INSERT INTO {} (id, title, description, completed, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
            self.table
        );
        sqlx::query(&sql)
            .bind(id.as_str())
            .bind(&record.title)
            .bind(&record.description)
            .bind(record.completed)
            .bind(&record.created_at)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert", e))?;
        Ok(id)
    }

    #[instrument(skip(self, value), fields(table = %self.table, field = field.as_str()), err)]
    async fn query_by_field(
        &self,
        field: Field,
        value: &str,
        exclude: Option<&TodoId>,
    ) -> Result<Vec<TodoRecord>, StoreError> {
        let sql = format!(
            r#"
            SELECT id, title, description, completed, created_at
            FROM {}
            WHERE {} = $1
                AND ($2::text IS NULL OR id <> $2)
            ORDER BY seq ASC
            "#,
            self.table,
            field.as_str()
        );
        let rows = sqlx::query(&sql)
            .bind(value)
            .bind(exclude.map(TodoId::as_str))
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("query_by_field", e))?;

        rows.iter().map(record_from_row).collect()
    }

    #[instrument(skip(self, patch), fields(table = %self.table, id = %id), err)]
    async fn update_by_id(
        &self,
        id: &TodoId,
        patch: TodoPatch,
    ) -> Result<Option<TodoRecord>, StoreError> {
        let sql = format!(
            r#"
            UPDATE {}
            SET title = $2, description = $3, completed = $4
            WHERE id = $1
            RETURNING id, title, description, completed, created_at
            "#,
            self.table
        );
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .bind(&patch.title)
            .bind(&patch.description)
            .bind(patch.completed)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("update_by_id", e))?;

        row.as_ref().map(record_from_row).transpose()
    }

    #[instrument(skip(self), fields(table = %self.table, id = %id), err)]
    async fn delete_by_id(&self, id: &TodoId) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        sqlx::query(&sql)
            .bind(id.as_str())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;
        Ok(())
    }
}

fn record_from_row(row: &PgRow) -> Result<TodoRecord, StoreError> {
    let decode = |e: sqlx::Error| StoreError::Corrupt(e.to_string());
    let id: String = row.try_get("id").map_err(decode)?;
    Ok(TodoRecord {
        id: TodoId::try_from(id).map_err(|e| StoreError::Corrupt(e.to_string()))?,
        title: row.try_get("title").map_err(decode)?,
        description: row.try_get("description").map_err(decode)?,
        completed: row.try_get("completed").map_err(decode)?,
        created_at: row.try_get("created_at").map_err(decode)?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some("23505") {
                StoreError::UniqueViolation(Field::Title.as_str().to_string())
            } else {
                StoreError::Unavailable(format!(
                    "database error in {}: {}",
                    operation,
                    db_err.message()
                ))
            }
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Corrupt(format!("decode error in {}: {}", operation, err))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        _ => StoreError::Unavailable(format!("sqlx error in {}: {}", operation, err)),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 48 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
