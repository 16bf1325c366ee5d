//! The event loop tying the router, the search coordinator and the api together.
//!
//! Everything that mutates client state goes through a single channel of
//! [`AppEvent`]s, so user input, fetch completions and timers are applied one
//! at a time in arrival order.

use std::{panic::AssertUnwindSafe, sync::Arc, time::Duration};

use futures::FutureExt;
use komik_core::{Catalog, ComicSummary};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    loaders::{self, PageContent},
    router::Intent,
    History, HistoryMode, Interaction, LoadError, Location, PendingLoad, Router, ScopeId,
    SearchCoordinator, Surface, TransitionToken,
};

pub type AppSender = mpsc::UnboundedSender<AppEvent>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Input(String),
    Submit,
    /// Interaction outside the search control.
    Dismiss,
    /// A dropdown entry was picked.
    Select(String),
}

#[derive(Debug)]
pub enum AppEvent {
    Navigate(Location),
    Back,
    Forward,
    /// The persisted location changed outside of the app (reload, bookmark).
    LocationChanged(String),
    Interaction {
        scope: ScopeId,
        interaction: Interaction,
    },
    Search(SearchEvent),
    Loaded {
        token: TransitionToken,
        outcome: Result<PageContent, LoadError>,
    },
    DebounceElapsed {
        generation: u64,
    },
    PreviewReady {
        generation: u64,
        outcome: komik_core::Result<Vec<ComicSummary>>,
    },
    Quit,
}

pub struct App<S, H> {
    api: Arc<dyn Catalog>,
    surface: S,
    router: Router<H>,
    search: SearchCoordinator,
    sender: AppSender,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl<S: Surface, H: History> App<S, H> {
    pub fn new(api: Arc<dyn Catalog>, surface: S, history: H) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            api,
            surface,
            router: Router::new(history),
            search: SearchCoordinator::new(sender.clone()),
            sender,
            receiver,
        }
    }

    #[must_use]
    pub fn set_debounce_delay(mut self, delay: Duration) -> Self {
        self.search = self.search.set_delay(delay);
        self
    }

    /// Handle for feeding events into the loop from the outside.
    #[must_use]
    pub fn sender(&self) -> AppSender {
        self.sender.clone()
    }

    #[must_use]
    pub fn router(&self) -> &Router<H> {
        &self.router
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn search(&self) -> &SearchCoordinator {
        &self.search
    }

    /// Loads whatever the persisted location points at, the home page otherwise.
    pub fn start(&mut self) {
        let location = self
            .router
            .history()
            .current()
            .map_or(Location::Home, Location::decode);
        info!("starting at {location}");
        self.navigate(location, HistoryMode::Replace);
    }

    /// Runs until [`AppEvent::Quit`] is received.
    pub async fn run(&mut self) {
        self.start();
        while self.step().await {}
        info!("event loop stopped");
    }

    /// Waits for the next event and applies it. Returns `false` once the loop should stop.
    pub async fn step(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(event) => self.handle(event),
            None => false,
        }
    }

    pub fn handle(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Navigate(location) => self.navigate(location, HistoryMode::Push),
            AppEvent::Back => self.back(),
            AppEvent::Forward => match self.router.history_mut().forward() {
                Some(entry) => self.restore(&entry),
                None => debug!("no forward entry"),
            },
            AppEvent::LocationChanged(entry) => self.restore(&entry),
            AppEvent::Interaction { scope, interaction } => {
                match self.router.interact(&mut self.surface, scope, &interaction) {
                    Some(Intent::Navigate(location)) => {
                        self.navigate(location, HistoryMode::Push);
                    }
                    Some(Intent::Back) => self.back(),
                    None => {}
                }
            }
            AppEvent::Search(event) => self.handle_search(event),
            AppEvent::Loaded { token, outcome } => {
                self.router.complete(&mut self.surface, token, outcome);
            }
            AppEvent::DebounceElapsed { generation } => {
                if let Some((generation, query)) = self.search.debounce_elapsed(generation) {
                    self.spawn_preview(generation, query);
                }
            }
            AppEvent::PreviewReady {
                generation,
                outcome,
            } => self
                .search
                .preview_ready(&mut self.surface, generation, outcome),
            AppEvent::Quit => return false,
        }
        true
    }

    fn handle_search(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::Input(text) => self.search.input(&mut self.surface, &text),
            SearchEvent::Submit => {
                if let Some(location) = self.search.submit(&mut self.surface) {
                    self.navigate(location, HistoryMode::Push);
                }
            }
            SearchEvent::Dismiss => self.search.dismiss(&mut self.surface),
            SearchEvent::Select(slug) => {
                let location = self.search.select(&mut self.surface, slug);
                self.navigate(location, HistoryMode::Push);
            }
        }
    }

    fn back(&mut self) {
        match self.router.history_mut().back() {
            Some(entry) => self.restore(&entry),
            None => debug!("no history entry to go back to"),
        }
    }

    fn restore(&mut self, entry: &str) {
        self.search.interrupt(&mut self.surface);
        let pending = self.router.location_changed(&mut self.surface, entry);
        self.spawn_load(pending);
    }

    fn navigate(&mut self, location: Location, mode: HistoryMode) {
        self.search.interrupt(&mut self.surface);
        let pending = self.router.navigate(&mut self.surface, location, mode);
        self.spawn_load(pending);
    }

    fn spawn_load(&self, pending: PendingLoad) {
        let PendingLoad { token, location } = pending;
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let outcome = match AssertUnwindSafe(loaders::fetch(api.as_ref(), &location))
                .catch_unwind()
                .await
            {
                Ok(result) => result.map_err(LoadError::from),
                Err(_) => {
                    error!("{token}: loader for {location} panicked");
                    Err(LoadError::Aborted(format!("loading {location} failed")))
                }
            };
            if sender.send(AppEvent::Loaded { token, outcome }).is_err() {
                debug!("{token}: event loop gone, dropping result");
            }
        });
    }

    fn spawn_preview(&self, generation: u64, query: String) {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            debug!("previewing {query:?}");
            let outcome = api.search(&query).await;
            if sender
                .send(AppEvent::PreviewReady {
                    generation,
                    outcome,
                })
                .is_err()
            {
                debug!("event loop gone, dropping preview {generation}");
            }
        });
    }
}
