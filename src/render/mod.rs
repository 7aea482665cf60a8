//! Renderer collaborators.
//!
//! The engine renders through two seams: a [`Card`] is the renderable
//! unit standing in for one record, a [`CardSurface`] is the display
//! surface the cards and the page-selector rail are mounted on. Cards
//! emit [`CardEvent`] notifications over a channel the engine hands
//! out at creation time and never interprets.

pub mod console;
pub mod headless;

use crate::error::Result;
use crate::paginator::PageWindow;
use crate::store::RecordId;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

pub use console::{ConsoleCard, ConsoleSurface};
pub use headless::{HeadlessCard, HeadlessSurface, SurfaceLog};

/// Notification emitted by a card. Forwarded to external listeners,
/// never interpreted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEvent {
    Play(RecordId),
    Update(RecordId),
    Delete(RecordId),
}

/// Renderable unit standing in for a single record.
#[async_trait]
pub trait Card: Send + Sync {
    /// Hydrate the unit from its record identifier.
    async fn load_data(&self, id: &RecordId) -> Result<()>;

    /// Refresh side effect. Must only be triggered once the unit is
    /// attached to the surface.
    fn check_update(&self);

    /// Identifier of the hydrated record, if hydration has happened.
    fn record_id(&self) -> Option<RecordId>;

    /// Display title of the hydrated record, for surfaces that draw
    /// cards themselves.
    fn title(&self) -> Option<String> {
        None
    }
}

/// What the engine asks the surface to draw on the selector rail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControls {
    /// Inclusive selector index range currently shown.
    pub window: PageWindow,
    /// Selector marked active.
    pub active: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Jump-to-first shortcut, shown when the window starts past 0.
    pub show_first: bool,
    /// Jump-to-last shortcut, shown when the window ends early.
    pub show_last: bool,
}

/// Display surface: card area plus the page-selector rail.
pub trait CardSurface: Send {
    /// Instantiate a fresh, unhydrated card wired to the event channel.
    fn create_card(&self, events: UnboundedSender<CardEvent>) -> Arc<dyn Card>;

    /// Show or hide the busy indicator (content hidden while busy).
    fn set_busy(&mut self, busy: bool);

    /// Remove every attached card.
    fn clear_cards(&mut self);

    /// Mount a hydrated card. Cards arrive in fetch order.
    fn attach_card(&mut self, card: Arc<dyn Card>);

    /// Remove every page selector.
    fn clear_controls(&mut self);

    /// Rebuild the selector rail.
    fn render_controls(&mut self, controls: &PageControls);
}
