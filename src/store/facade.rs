//! Record store trait and owning wrapper.

use crate::error::Result;
use crate::store::{Query, Record, RecordId, SortSpec};
use async_trait::async_trait;

/// Queryable record source.
///
/// `search` selects a skip/limit window: it skips the first
/// `page_index * page_size` matches and returns at most `limit`
/// records in `sort` order. A `limit` of 0 means no limit.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn count(&self, query: &Query) -> Result<u64>;

    async fn search(
        &self,
        query: &Query,
        sort: &SortSpec,
        page_index: usize,
        page_size: usize,
        limit: usize,
    ) -> Result<Vec<Record>>;

    /// Insert a record; validates against the store's schema first.
    async fn insert(&self, record: Record) -> Result<Record>;

    async fn read(&self, id: &RecordId) -> Result<Option<Record>>;

    /// Replace the record with the same id; validates first.
    /// Returns the number of records affected.
    async fn write(&self, record: Record) -> Result<u64>;

    /// Remove every matching record, returning the removed count.
    async fn delete(&self, query: &Query) -> Result<u64>;
}

/// Main record-store interface
pub struct Store {
    engine: Box<dyn RecordStore>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish()
    }
}

impl Store {
    pub fn new(engine: Box<dyn RecordStore>) -> Self {
        Self { engine }
    }

    pub async fn count(&self, query: &Query) -> Result<u64> {
        self.engine.count(query).await
    }

    pub async fn search(
        &self,
        query: &Query,
        sort: &SortSpec,
        page_index: usize,
        page_size: usize,
        limit: usize,
    ) -> Result<Vec<Record>> {
        self.engine
            .search(query, sort, page_index, page_size, limit)
            .await
    }

    pub async fn insert(&self, record: Record) -> Result<Record> {
        self.engine.insert(record).await
    }

    pub async fn read(&self, id: &RecordId) -> Result<Option<Record>> {
        self.engine.read(id).await
    }

    pub async fn write(&self, record: Record) -> Result<u64> {
        self.engine.write(record).await
    }

    pub async fn delete(&self, query: &Query) -> Result<u64> {
        self.engine.delete(query).await
    }
}
