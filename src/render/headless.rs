//! Headless surface.
//!
//! Renders nothing; records everything. Backs the test-suite and any
//! embedding that only wants the engine's state transitions.

use crate::error::{Error, Result};
use crate::render::{Card, CardEvent, CardSurface, PageControls};
use crate::store::{Record, RecordId, Store};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Everything a [`HeadlessSurface`] has been asked to do so far.
#[derive(Debug, Clone, Default)]
pub struct SurfaceLog {
    /// Identifiers of the currently attached cards, in attach order.
    pub attached: Vec<RecordId>,
    /// Current busy-indicator state.
    pub busy: bool,
    /// Times the busy indicator was switched on (= load sequences begun).
    pub loads_started: usize,
    /// Times the card area was cleared.
    pub clears: usize,
    /// Last rendered selector rail, `None` after `clear_controls`.
    pub controls: Option<PageControls>,
    /// Post-attach refreshes triggered across all cards.
    pub check_updates: usize,
}

/// Surface that records engine interactions instead of drawing them.
pub struct HeadlessSurface {
    store: Arc<Store>,
    log: Arc<Mutex<SurfaceLog>>,
}

impl HeadlessSurface {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            log: Arc::new(Mutex::new(SurfaceLog::default())),
        }
    }

    /// Shared handle onto the log; clone it before handing the surface
    /// to a paginator.
    pub fn probe(&self) -> Arc<Mutex<SurfaceLog>> {
        Arc::clone(&self.log)
    }
}

impl CardSurface for HeadlessSurface {
    fn create_card(&self, events: UnboundedSender<CardEvent>) -> Arc<dyn Card> {
        Arc::new(HeadlessCard {
            store: Arc::clone(&self.store),
            log: Arc::clone(&self.log),
            slot: RwLock::new(None),
            events,
        })
    }

    fn set_busy(&mut self, busy: bool) {
        let mut log = self.log.lock();
        log.busy = busy;
        if busy {
            log.loads_started += 1;
        }
    }

    fn clear_cards(&mut self) {
        let mut log = self.log.lock();
        log.attached.clear();
        log.clears += 1;
    }

    fn attach_card(&mut self, card: Arc<dyn Card>) {
        if let Some(id) = card.record_id() {
            self.log.lock().attached.push(id);
        }
    }

    fn clear_controls(&mut self) {
        self.log.lock().controls = None;
    }

    fn render_controls(&mut self, controls: &PageControls) {
        self.log.lock().controls = Some(controls.clone());
    }
}

/// Card counterpart of [`HeadlessSurface`]: hydrates from the store,
/// counts refreshes, and emits an update notification when the record
/// advertises one.
pub struct HeadlessCard {
    store: Arc<Store>,
    log: Arc<Mutex<SurfaceLog>>,
    slot: RwLock<Option<Record>>,
    events: UnboundedSender<CardEvent>,
}

#[async_trait]
impl Card for HeadlessCard {
    async fn load_data(&self, id: &RecordId) -> Result<()> {
        let record = self
            .store
            .read(id)
            .await?
            .ok_or_else(|| Error::Card(format!("record not found: {id}")))?;
        *self.slot.write() = Some(record);
        Ok(())
    }

    fn check_update(&self) {
        self.log.lock().check_updates += 1;
        let slot = self.slot.read();
        if let Some(record) = slot.as_ref() {
            if record.field("update_available") == Some(Value::Bool(true)) {
                let _ = self.events.send(CardEvent::Update(record.id));
            }
        }
    }

    fn record_id(&self) -> Option<RecordId> {
        self.slot.read().as_ref().map(|r| r.id)
    }
}
