//! Console surface for the demo binary.

use crate::error::{Error, Result};
use crate::render::{Card, CardEvent, CardSurface, PageControls};
use crate::store::{Record, RecordId, Store};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Draws the card area and the selector rail as plain text.
pub struct ConsoleSurface {
    store: Arc<Store>,
    cards: Vec<Arc<dyn Card>>,
}

impl ConsoleSurface {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            cards: Vec::new(),
        }
    }
}

impl CardSurface for ConsoleSurface {
    fn create_card(&self, events: UnboundedSender<CardEvent>) -> Arc<dyn Card> {
        Arc::new(ConsoleCard {
            store: Arc::clone(&self.store),
            slot: RwLock::new(None),
            events,
        })
    }

    fn set_busy(&mut self, busy: bool) {
        if busy {
            println!("  ... loading ...");
        }
    }

    fn clear_cards(&mut self) {
        self.cards.clear();
    }

    fn attach_card(&mut self, card: Arc<dyn Card>) {
        if let Some(title) = card.title() {
            println!("  * {title}");
        }
        self.cards.push(card);
    }

    fn clear_controls(&mut self) {
        // Text output has nothing persistent to tear down.
    }

    fn render_controls(&mut self, controls: &PageControls) {
        let mut rail = String::new();
        if controls.show_first {
            rail.push_str("|< ");
        }
        rail.push_str(if controls.prev_enabled { "< " } else { ". " });
        for index in controls.window.start..=controls.window.end {
            if index as usize == controls.active {
                rail.push_str(&format!("[{}] ", index + 1));
            } else {
                rail.push_str(&format!("{} ", index + 1));
            }
        }
        rail.push_str(if controls.next_enabled { ">" } else { "." });
        if controls.show_last {
            rail.push_str(" >|");
        }
        println!("  {rail}");
    }
}

/// Text card: hydrates from the store, prints its record on attach via
/// the surface, and raises an update notification when the record
/// advertises one.
pub struct ConsoleCard {
    store: Arc<Store>,
    slot: RwLock<Option<Record>>,
    events: UnboundedSender<CardEvent>,
}

#[async_trait]
impl Card for ConsoleCard {
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
        let slot = self.slot.read();
        if let Some(record) = slot.as_ref() {
            debug!(name = %record.name, "checking for updates");
            if record.field("update_available") == Some(Value::Bool(true)) {
                let _ = self.events.send(CardEvent::Update(record.id));
            }
        }
    }

    fn record_id(&self) -> Option<RecordId> {
        self.slot.read().as_ref().map(|r| r.id)
    }

    fn title(&self) -> Option<String> {
        self.slot.read().as_ref().map(|r| r.name.clone())
    }
}
