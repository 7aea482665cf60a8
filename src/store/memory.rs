//! In-memory record store.
//!
//! Reference implementation of [`RecordStore`] used by the tests and
//! the demo binary. Locks are only held across synchronous sections.

use crate::error::{Error, Result};
use crate::store::{Query, Record, RecordId, RecordStore, Schema, SortSpec};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory record store with schema-gated writes.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<Record>>>,
    schema: Arc<Schema>,
}

impl MemoryStore {
    /// Create a store with a permissive schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store validating every insert/write against `schema`.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            schema: Arc::new(schema),
        }
    }

    /// Get the number of records stored
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Clear all records
    pub fn clear(&self) {
        self.records.write().clear();
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn count(&self, query: &Query) -> Result<u64> {
        let records = self.records.read();
        Ok(records.iter().filter(|r| query.matches(r)).count() as u64)
    }

    async fn search(
        &self,
        query: &Query,
        sort: &SortSpec,
        page_index: usize,
        page_size: usize,
        limit: usize,
    ) -> Result<Vec<Record>> {
        let records = self.records.read();
        let mut matched: Vec<Record> = records
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        matched.sort_by(|a, b| sort.compare(a, b));

        let skipped = matched.into_iter().skip(page_index * page_size);
        let page = if limit > 0 {
            skipped.take(limit).collect()
        } else {
            skipped.collect()
        };
        Ok(page)
    }

    async fn insert(&self, mut record: Record) -> Result<Record> {
        self.schema.validate(&record)?;

        let mut records = self.records.write();
        if records.iter().any(|r| r.id == record.id) {
            return Err(Error::Store(format!("record already exists: {}", record.id)));
        }

        let now = Utc::now();
        record.created_at = now;
        record.updated_at = now;
        records.push(record.clone());
        Ok(record)
    }

    async fn read(&self, id: &RecordId) -> Result<Option<Record>> {
        let records = self.records.read();
        Ok(records.iter().find(|r| r.id == *id).cloned())
    }

    async fn write(&self, mut record: Record) -> Result<u64> {
        self.schema.validate(&record)?;

        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                // Creation stamp survives the replace.
                record.created_at = existing.created_at;
                record.updated_at = Utc::now();
                *existing = record;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, query: &Query) -> Result<u64> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| !query.matches(r));
        Ok((before - records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Constraint, FieldKind, OrderDirection};
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_read_delete_roundtrip() -> Result<()> {
        let store = MemoryStore::new();

        let stored = store.insert(Record::new("alpha")).await?;
        assert_eq!(store.len(), 1);

        let read = store.read(&stored.id).await?;
        assert_eq!(read.as_ref().map(|r| r.name.as_str()), Some("alpha"));

        let removed = store.delete(&Query::by_id(&stored.id)).await?;
        assert_eq!(removed, 1);
        assert!(store.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() -> Result<()> {
        let store = MemoryStore::new();
        let stored = store.insert(Record::new("alpha")).await?;
        assert!(store.insert(stored).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_write_replaces_and_counts() -> Result<()> {
        let store = MemoryStore::new();
        let mut stored = store.insert(Record::new("before")).await?;

        stored.name = "after".into();
        assert_eq!(store.write(stored.clone()).await?, 1);
        let read = store.read(&stored.id).await?.unwrap();
        assert_eq!(read.name, "after");
        assert_eq!(read.created_at, stored.created_at);

        // Unknown id matches nothing.
        assert_eq!(store.write(Record::new("ghost")).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_search_applies_sort_skip_and_limit() -> Result<()> {
        let store = MemoryStore::new();
        for name in ["delta", "alpha", "echo", "charlie", "bravo"] {
            store.insert(Record::new(name)).await?;
        }

        let sort = SortSpec::default();
        let page = store.search(&Query::all(), &sort, 1, 2, 2).await?;
        let names: Vec<&str> = page.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["charlie", "delta"]);

        // limit 0 = no limit
        let all = store.search(&Query::all(), &sort, 0, 0, 0).await?;
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].name, "alpha");

        let reversed = store
            .search(
                &Query::all(),
                &SortSpec::new().by("name", OrderDirection::Desc),
                0,
                0,
                1,
            )
            .await?;
        assert_eq!(reversed[0].name, "echo");
        Ok(())
    }

    #[tokio::test]
    async fn test_count_honors_query() -> Result<()> {
        let store = MemoryStore::new();
        store.insert(Record::new("foobar")).await?;
        store.insert(Record::new("bar")).await?;

        assert_eq!(store.count(&Query::all()).await?, 2);
        let query = Query::all().with("name", Constraint::Contains("foo".into()));
        assert_eq!(store.count(&query).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_schema_gates_insert_and_write() {
        let schema = Schema::default().field("version", FieldKind::String, true);
        let store = MemoryStore::with_schema(schema);

        let bare = Record::new("no version");
        assert!(matches!(
            store.insert(bare.clone()).await,
            Err(Error::SchemaValidation { .. })
        ));
        assert!(store.is_empty());

        let versioned = bare.with_field("version", json!("1.0"));
        assert!(store.insert(versioned).await.is_ok());
    }
}
