//! Incremental search: debounced dropdown previews and committed searches.

use std::time::Duration;

use komik_core::ComicSummary;
use tokio::{sync::mpsc, task::JoinHandle, time::sleep};
use tracing::{debug, warn};

use crate::{AppEvent, Dropdown, Location, Surface};

/// Quiet period after the last keystroke before a preview search is sent.
pub static DEBOUNCE_DELAY: Duration = Duration::from_millis(300);
/// Shortest query that triggers a preview.
pub static PREVIEW_MIN_QUERY_LEN: usize = 3;

#[derive(Debug)]
pub struct SearchCoordinator {
    query: String,
    results_visible: bool,
    pending: Option<JoinHandle<()>>,
    /// Bumped whenever earlier previews must not reach the dropdown anymore.
    generation: u64,
    delay: Duration,
    sender: mpsc::UnboundedSender<AppEvent>,
}

impl SearchCoordinator {
    pub fn new(sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            query: String::new(),
            results_visible: false,
            pending: None,
            generation: 0,
            delay: DEBOUNCE_DELAY,
            sender,
        }
    }

    #[must_use]
    pub fn set_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results_visible(&self) -> bool {
        self.results_visible
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// New input text: reschedules the preview or hides the dropdown for short queries.
    pub fn input<S: Surface + ?Sized>(&mut self, surface: &mut S, text: &str) {
        self.query = text.trim().to_string();
        self.invalidate();
        if self.query.chars().count() >= PREVIEW_MIN_QUERY_LEN {
            self.schedule();
        } else {
            self.hide(surface);
        }
    }

    /// Explicit submission, returns the search page to navigate to.
    pub fn submit<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<Location> {
        if self.query.is_empty() {
            return None;
        }
        let query = std::mem::take(&mut self.query);
        self.reset(surface);
        Some(Location::Search(query))
    }

    /// A dropdown entry was picked.
    pub fn select<S: Surface + ?Sized>(&mut self, surface: &mut S, slug: String) -> Location {
        self.query.clear();
        self.reset(surface);
        Location::Detail(slug)
    }

    /// Interaction outside the search control: hide the dropdown, keep the query.
    pub fn dismiss<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.hide(surface);
    }

    /// The page is changing: no preview scheduled or in flight may show up afterwards.
    pub fn interrupt<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.invalidate();
        self.hide(surface);
    }

    /// Drops the pending debounce timer, if any.
    pub fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!("cancelling pending preview search");
            pending.abort();
        }
    }

    /// The debounce timer of `generation` fired, returns the query to preview.
    pub fn debounce_elapsed(&mut self, generation: u64) -> Option<(u64, String)> {
        if generation != self.generation || self.pending.take().is_none() {
            debug!("stale debounce {generation}, current is {}", self.generation);
            return None;
        }
        Some((generation, self.query.clone()))
    }

    pub fn preview_ready<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        generation: u64,
        outcome: komik_core::Result<Vec<ComicSummary>>,
    ) {
        if generation != self.generation {
            debug!("stale preview {generation}, current is {}", self.generation);
            return;
        }
        let dropdown = match outcome {
            Ok(comics) if comics.is_empty() => Dropdown::Empty,
            Ok(comics) => Dropdown::Results(comics),
            Err(err) => {
                warn!("preview search failed: {err}");
                Dropdown::Failed
            }
        };
        surface.show_dropdown(dropdown);
        self.results_visible = true;
    }

    fn schedule(&mut self) {
        let generation = self.generation;
        let delay = self.delay;
        let sender = self.sender.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            if sender.send(AppEvent::DebounceElapsed { generation }).is_err() {
                warn!("app channel closed before preview {generation}");
            }
        }));
    }

    fn invalidate(&mut self) {
        self.cancel_pending();
        self.generation += 1;
    }

    fn hide<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if self.results_visible {
            surface.hide_dropdown();
            self.results_visible = false;
        }
    }

    fn reset<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.invalidate();
        self.hide(surface);
        surface.clear_search_input();
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
