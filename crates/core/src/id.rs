//! Identifier of a to-do item.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Opaque, store-assigned identifier of a to-do item.
///
/// Stores generate these as UUIDv7 text, but callers must treat the value as
/// an opaque string: ids arriving over HTTP are never reparsed as UUIDs, so a
/// foreign id simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Generate a fresh identifier (time-ordered UUIDv7).
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Display for TodoId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TodoId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(DomainError::invalid_id("TodoId: must not be empty"));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for TodoId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(DomainError::invalid_id("TodoId: must not be empty"));
        }
        Ok(Self(value))
    }
}

impl From<TodoId> for String {
    fn from(value: TodoId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = TodoId::generate();
        let b = TodoId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(matches!("".parse::<TodoId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("   ".parse::<TodoId>(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn parse_keeps_foreign_ids_verbatim() {
        let id: TodoId = "abc123XYZ".parse().unwrap();
        assert_eq!(id.as_str(), "abc123XYZ");
        assert_eq!(id.to_string(), "abc123XYZ");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id: TodoId = "doc-1".parse().unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("doc-1"));
    }
}
