//! The to-do item and its title value object.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::TodoId;
use crate::value_object::ValueObject;

/// Non-empty item title.
///
/// Uniqueness is exact and case-sensitive: `"Milk"` and `"milk"` are
/// different titles. Surrounding whitespace is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::validation("Title is required"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl ValueObject for Title {}

impl core::fmt::Display for Title {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A to-do item as stored and as sent over the wire.
///
/// `created_at` is an RFC 3339 string with millisecond precision and a `Z`
/// suffix; it is written once at creation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: String,
}

impl Todo {
    /// Description lines rendered as a display checklist.
    ///
    /// Blank lines are skipped; each entry is trimmed.
    pub fn checklist_items(&self) -> Vec<&str> {
        self.description
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Parsed creation time, if the stored string is a valid RFC 3339 value.
    pub fn created_at_time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

impl Entity for Todo {
    type Id = TodoId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Format a timestamp the way items store `createdAt`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
