//! Navigation handling and load orchestration.
//!
//! The paginator owns the current query/sort state and page index,
//! gates every navigation through a record-set comparison, and
//! serializes accepted navigations into a single in-flight load. The
//! loading flag is the sole concurrency-control primitive: an atomic
//! flipped with compare-exchange, released unconditionally when the
//! load sequence finishes, success or failure.

use crate::config::PaginatorConfig;
use crate::error::{Error, Result};
use crate::paginator::window::compute_window;
use crate::render::{Card, CardEvent, CardSurface, PageControls};
use crate::report::{ErrorSink, TracingSink};
use crate::store::{Constraint, Query, Record, RecordId, SortSpec, Store};
use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// Keyboard intents understood by the paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowRight,
    ArrowLeft,
}

/// Mutable engine state. Everything here is explicit: the current
/// index, the rendered identifiers, and the prev/next enablement are
/// never re-derived from whatever the surface happens to display.
#[derive(Debug)]
struct EngineState {
    current_index: Option<usize>,
    cards_per_page: usize,
    query: Query,
    sort: SortSpec,
    rendered: Vec<RecordId>,
    prev_enabled: bool,
    next_enabled: bool,
}

/// Releases the loading flag when the load sequence unwinds.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Windowed card paginator over a queryable record store.
pub struct Paginator {
    store: Arc<Store>,
    surface: Mutex<Box<dyn CardSurface>>,
    state: Mutex<EngineState>,
    loading: AtomicBool,
    sink: Arc<dyn ErrorSink>,
    config: PaginatorConfig,
    events: UnboundedSender<CardEvent>,
    events_rx: Mutex<Option<UnboundedReceiver<CardEvent>>>,
}

impl Paginator {
    /// Attach a paginator to a store and a display surface.
    pub fn new(
        store: Arc<Store>,
        surface: Box<dyn CardSurface>,
        config: PaginatorConfig,
    ) -> Result<Self> {
        config.validate()?;
        let (events, events_rx) = mpsc::unbounded_channel();
        Ok(Self {
            store,
            surface: Mutex::new(surface),
            state: Mutex::new(EngineState {
                current_index: None,
                cards_per_page: config.cards_per_page,
                query: Query::all(),
                sort: SortSpec::default(),
                rendered: Vec::new(),
                prev_enabled: false,
                next_enabled: false,
            }),
            loading: AtomicBool::new(false),
            sink: Arc::new(TracingSink),
            config,
            events,
            events_rx: Mutex::new(Some(events_rx)),
        })
    }

    /// Replace the default tracing sink.
    pub fn with_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Card notifications, forwarded verbatim. Can be taken once.
    pub fn take_events(&self) -> Option<UnboundedReceiver<CardEvent>> {
        self.events_rx.lock().take()
    }

    /// True while a load sequence is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Index of the currently displayed page, once something loaded.
    pub fn current_index(&self) -> Option<usize> {
        self.state.lock().current_index
    }

    pub fn cards_per_page(&self) -> usize {
        self.state.lock().cards_per_page
    }

    //
    // Navigation intents
    //

    /// Load and show the page at `index` (0 on first use).
    pub async fn load(&self, index: usize) -> Result<bool> {
        self.gated_switch("paginator.load", index, false).await
    }

    /// Select the page following the current one.
    pub async fn next(&self) -> Result<bool> {
        let target = {
            let state = self.state.lock();
            match state.current_index {
                Some(index) if state.next_enabled => index + 1,
                _ => return Ok(false),
            }
        };
        self.gated_switch("paginator.next", target, false).await
    }

    /// Select the page preceding the current one.
    pub async fn prev(&self) -> Result<bool> {
        let target = {
            let state = self.state.lock();
            match state.current_index {
                Some(index) if state.prev_enabled && index > 0 => index - 1,
                _ => return Ok(false),
            }
        };
        self.gated_switch("paginator.prev", target, false).await
    }

    /// Select the first page.
    pub async fn first(&self) -> Result<bool> {
        self.gated_switch("paginator.first", 0, false).await
    }

    /// Select the last page, against a fresh page count.
    pub async fn last(&self) -> Result<bool> {
        let total_pages = match self.count_pages().await {
            Ok(n) => n,
            Err(e) => {
                self.sink.report("paginator.last", &e);
                return Err(e);
            }
        };
        if total_pages == 0 {
            return Ok(false);
        }
        self.gated_switch("paginator.last", total_pages - 1, false)
            .await
    }

    /// Change the displayed page to an explicit selector index.
    pub async fn select_page(&self, index: usize) -> Result<bool> {
        self.gated_switch("paginator.select_page", index, false)
            .await
    }

    /// Show every record whose name contains `text`, from page 0.
    /// The current query is replaced, never merged.
    pub async fn search(&self, text: &str) -> Result<bool> {
        self.state.lock().query = build_search_query(text);
        info!(text, "searching records");
        self.gated_switch("paginator.search", 0, false).await
    }

    /// Reload the current page (or page 0 before the first load).
    /// `force` bypasses the reconciliation gate but not the loading
    /// guard.
    pub async fn reload(&self, force: bool) -> Result<bool> {
        let index = self.state.lock().current_index.unwrap_or(0);
        self.gated_switch("paginator.reload", index, force).await
    }

    /// Replace the sort order; `None` restores the resting sort.
    /// Ignored while a load is in flight.
    pub fn sort(&self, sort: Option<SortSpec>) {
        if self.is_loading() {
            return;
        }
        self.state.lock().sort = sort.unwrap_or_default();
    }

    /// Recompute how many cards fit the given viewport, then reload.
    pub async fn resize(&self, width: u32, height: u32) -> Result<bool> {
        let columns = (width / self.config.card_width).min(self.config.max_columns);
        let rows = height / self.config.card_height;

        // Never fewer than one card.
        let candidate = (columns * rows) as usize;
        let cards_per_page = candidate.max(1);
        self.state.lock().cards_per_page = cards_per_page;
        info!(width, height, cards_per_page, "viewport resized");

        self.reload(false).await
    }

    /// Arrow-key navigation; a no-op while a load is in flight.
    pub async fn handle_key(&self, key: NavKey) -> Result<bool> {
        if self.is_loading() {
            return Ok(false);
        }
        match key {
            NavKey::ArrowRight => self.next().await,
            NavKey::ArrowLeft => self.prev().await,
        }
    }

    //
    // Reconciliation gate
    //

    /// Decides whether loading `index` would change what is rendered:
    /// yes when the candidate and rendered sets differ in size, or when
    /// some candidate identifier is not rendered yet. One-directional
    /// containment, not full set equality.
    async fn should_switch(&self, index: usize) -> Result<bool> {
        let records = self.paginate(index).await?;
        let candidate: Vec<RecordId> = records.iter().map(|r| r.id).collect();

        let rendered: HashSet<RecordId> = {
            let state = self.state.lock();
            state.rendered.iter().copied().collect()
        };

        if candidate.len() != rendered.len() {
            return Ok(true);
        }
        Ok(!candidate.iter().all(|id| rendered.contains(id)))
    }

    //
    // Load orchestration
    //

    /// Gate, then switch. Gate failures are reported with the intent's
    /// context tag and abort the intent; they never count as "nothing
    /// to do".
    async fn gated_switch(&self, tag: &str, index: usize, force: bool) -> Result<bool> {
        let should = if force {
            true
        } else {
            match self.should_switch(index).await {
                Ok(should) => should,
                Err(e) => {
                    self.sink.report(tag, &e);
                    return Err(e);
                }
            }
        };
        if !should {
            debug!(index, "nothing new to render, navigation suppressed");
            return Ok(false);
        }
        self.switch_context(tag, index).await
    }

    /// The single-flight load. Any intent arriving while a load is in
    /// flight is dropped, not queued. Returns `true` when a load ran.
    async fn switch_context(&self, tag: &str, index: usize) -> Result<bool> {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(index, "load already in flight, intent dropped");
            return Ok(false);
        }
        let _flight = FlightGuard(&self.loading);

        // Deferred one tick: hide content, load, show content.
        tokio::task::yield_now().await;
        self.surface.lock().set_busy(true);
        let result = self.switch_page(tag, index).await;
        self.surface.lock().set_busy(false);

        result.map(|()| true)
    }

    /// The load sequence proper: fetch, clear, hydrate fan-out, attach
    /// in fetch order, then rebuild the selector rail.
    async fn switch_page(&self, tag: &str, index: usize) -> Result<()> {
        let records = match self.paginate(index).await {
            Ok(records) => records,
            Err(e) => {
                self.sink.report(tag, &e);
                return Err(e);
            }
        };
        info!(index, count = records.len(), "loading page");

        // Previous content goes away before the new cards exist.
        let cards: Vec<Arc<dyn Card>> = {
            let mut surface = self.surface.lock();
            surface.clear_cards();
            records
                .iter()
                .map(|_| surface.create_card(self.events.clone()))
                .collect()
        };

        // Hydrate concurrently; every hydration runs to completion and
        // the first failure surfaces afterwards.
        let hydrations = cards
            .iter()
            .zip(records.iter())
            .map(|(card, record)| card.load_data(&record.id));
        let outcome = join_all(hydrations).await;
        if let Some(e) = outcome.into_iter().find_map(std::result::Result::err) {
            self.sink.report(tag, &e);
            return Err(e);
        }

        // Attach in fetch order; a card refreshes only once mounted.
        {
            let mut surface = self.surface.lock();
            for card in &cards {
                surface.attach_card(Arc::clone(card));
                card.check_update();
            }
        }

        {
            let mut state = self.state.lock();
            state.rendered = records.iter().map(|r| r.id).collect();
            state.current_index = Some(index);
        }

        self.refresh_controls(tag, index).await
    }

    /// Rebuilds the page-selector rail for `index`.
    async fn refresh_controls(&self, tag: &str, index: usize) -> Result<()> {
        let total_pages = match self.count_pages().await {
            Ok(n) => n,
            Err(e) => {
                self.sink.report(tag, &e);
                return Err(e);
            }
        };
        let window = compute_window(index, total_pages, self.config.max_visible_pages)?;

        self.surface.lock().clear_controls();

        // No selectors for an empty or single-page window.
        if !window.spans_multiple() {
            let mut state = self.state.lock();
            state.prev_enabled = false;
            state.next_enabled = false;
            return Ok(());
        }

        // Next/prev enablement takes its own count; a failure here is
        // reported but leaves the rendered cards in place.
        let prev_enabled = index != 0;
        let next_enabled = match self.count_pages().await {
            Ok(n) => index != n.saturating_sub(1),
            Err(e) => {
                self.sink.report("paginator.controls", &e);
                return Ok(());
            }
        };

        {
            let mut state = self.state.lock();
            state.prev_enabled = prev_enabled;
            state.next_enabled = next_enabled;
        }

        let controls = PageControls {
            window,
            active: index,
            prev_enabled,
            next_enabled,
            show_first: window.start > 0,
            show_last: (window.end as usize) < total_pages.saturating_sub(1),
        };
        self.surface.lock().render_controls(&controls);
        Ok(())
    }

    //
    // Store access
    //

    /// Records of the page at `index` under the current query/sort.
    async fn paginate(&self, index: usize) -> Result<Vec<Record>> {
        let (query, sort, size) = {
            let state = self.state.lock();
            (
                state.query.clone(),
                state.sort.clone(),
                state.cards_per_page,
            )
        };
        self.store.search(&query, &sort, index, size, size).await
    }

    /// Page count under the current query and page size.
    async fn count_pages(&self) -> Result<usize> {
        let (query, size) = {
            let state = self.state.lock();
            (state.query.clone(), state.cards_per_page)
        };
        let records = self.store.count(&query).await? as usize;
        Ok(records.div_ceil(size))
    }
}

/// Builds the query for a name search: empty or whitespace-only input
/// selects everything, anything else is a case-insensitive substring
/// match on the name field.
pub fn build_search_query(text: &str) -> Query {
    if text.trim().is_empty() {
        Query::all()
    } else {
        Query::all().with("name", Constraint::Contains(text.to_string()))
    }
}
