//! Record identity and document shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// A unique identifier for a stored record.
///
/// # Examples
///
/// ```rust
/// use carddeck::store::RecordId;
///
/// let id1 = RecordId::new();
/// let id2 = RecordId::new();
/// assert_ne!(id1, id2); // UUIDs are unique
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a new random record ID using UUIDv4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RecordId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

/// A stored document.
///
/// The paginator never mutates records; it only reads identifiers for
/// comparison. The `name` field backs sorting and substring search,
/// everything else lives in the open `fields` map. Timestamps are
/// stamped by the store on insert/write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Creates a record with a fresh id and the given name.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            name: name.into(),
            fields: serde_json::Map::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style extra field.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Looks up a field by name. `id` and `name` resolve to the
    /// dedicated members, everything else to the open map.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.to_string())),
            "name" => Some(Value::String(self.name.clone())),
            other => self.fields.get(other).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_field_lookup() {
        let record = Record::new("Alice").with_field("score", serde_json::json!(42));

        assert_eq!(record.field("name"), Some(Value::String("Alice".into())));
        assert_eq!(record.field("score"), Some(serde_json::json!(42)));
        assert_eq!(record.field("missing"), None);
        assert_eq!(
            record.field("id"),
            Some(Value::String(record.id.to_string()))
        );
    }

    #[test]
    fn test_record_ids_are_unique() {
        let a = Record::new("a");
        let b = Record::new("a");
        assert_ne!(a.id, b.id);
    }
}
