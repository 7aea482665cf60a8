//! End-to-end paginator flow over the in-memory store

use carddeck::render::HeadlessSurface;
use carddeck::store::{MemoryStore, Query, Record, RecordStore};
use carddeck::{Paginator, PaginatorConfig, Store};
use std::sync::Arc;

#[tokio::test]
async fn test_browse_search_and_reload_flow() {
    // Seed 23 records: 3 pages of 8/8/7 under the default config.
    let memory = MemoryStore::new();
    for i in 0..23 {
        memory
            .insert(Record::new(format!("Game {:02}", i + 1)))
            .await
            .expect("Failed to seed record");
    }
    let store = Arc::new(Store::new(Box::new(memory.clone())));

    let surface = HeadlessSurface::new(Arc::clone(&store));
    let probe = surface.probe();
    let paginator = Paginator::new(store, Box::new(surface), PaginatorConfig::default())
        .expect("Failed to build paginator");

    // Initial load shows the first page.
    assert!(paginator.load(0).await.expect("Failed to load page 0"));
    {
        let log = probe.lock();
        assert_eq!(log.attached.len(), 8);
        let controls = log.controls.clone().expect("controls should render");
        assert!(!controls.prev_enabled, "prev must start disabled");
        assert!(controls.next_enabled, "next must start enabled");
    }

    // Walk to the last page.
    assert!(paginator.next().await.expect("Failed to go to page 1"));
    assert!(paginator.next().await.expect("Failed to go to page 2"));
    {
        let log = probe.lock();
        assert_eq!(log.attached.len(), 7, "last page holds the remainder");
        let controls = log.controls.clone().unwrap();
        assert!(!controls.next_enabled, "next disabled on the last page");
        assert!(controls.prev_enabled);
    }
    assert_eq!(paginator.current_index(), Some(2));

    // A search narrows the result set and resets to page 0.
    assert!(paginator.search("game 0").await.expect("Failed to search"));
    assert_eq!(paginator.current_index(), Some(0));
    let searched: Vec<_> = probe.lock().attached.clone();
    assert_eq!(searched.len(), 8, "Game 01..09 minus one page remainder");

    // Server-side delete of a rendered record, then a plain reload.
    let removed = memory
        .delete(&Query::by_id(&searched[0]))
        .await
        .expect("Failed to delete record");
    assert_eq!(removed, 1);

    assert!(
        paginator.reload(false).await.expect("Failed to reload"),
        "reload must notice the deleted record"
    );
    assert!(!probe.lock().attached.contains(&searched[0]));

    // Nothing changed since: the gate suppresses the second reload.
    assert!(!paginator.reload(false).await.expect("Failed to reload"));
    assert!(!paginator.is_loading());
}
