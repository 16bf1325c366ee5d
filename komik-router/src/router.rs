//! The navigation core: one transition at a time, most recent wins.

use std::fmt;

use tracing::{debug, info, warn};

use crate::{
    loaders::{self, PageContent, Rendered},
    Effect, History, HistoryMode, Interaction, LoadError, Location, ReaderState, RenderScope,
    ScopeId, Surface,
};

/// Identifies one navigation attempt. Later transitions carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionToken(u64);

impl fmt::Display for TransitionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transition#{}", self.0)
    }
}

impl From<TransitionToken> for ScopeId {
    fn from(token: TransitionToken) -> Self {
        ScopeId(token.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouterState {
    Idle,
    Loading(TransitionToken),
    Loaded,
}

/// A fetch the caller has to run, then report back through [`Router::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    pub token: TransitionToken,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Completion {
    Rendered,
    /// An error block was rendered instead of content.
    Failed,
    /// A newer transition superseded this one, nothing was rendered.
    Stale,
}

/// Follow-up requested by a listener that only the caller can carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Navigate(Location),
    Back,
}

#[derive(Debug)]
pub struct Router<H> {
    history: H,
    location: Location,
    state: RouterState,
    last_token: u64,
    scope: Option<RenderScope>,
    reader: Option<ReaderState>,
}

impl<H: History> Router<H> {
    pub fn new(history: H) -> Self {
        Self {
            history,
            location: Location::Home,
            state: RouterState::Idle,
            last_token: 0,
            scope: None,
            reader: None,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn reader(&self) -> Option<&ReaderState> {
        self.reader.as_ref()
    }

    /// Id of the render scope currently mounted, if any.
    pub fn scope_id(&self) -> Option<ScopeId> {
        self.scope.as_ref().map(RenderScope::id)
    }

    /// Starts a transition to `location`.
    ///
    /// Previously mounted content and its listeners are gone when this returns.
    pub fn navigate<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        location: Location,
        mode: HistoryMode,
    ) -> PendingLoad {
        self.last_token += 1;
        let token = TransitionToken(self.last_token);
        info!("{token}: navigating to {location}");

        self.history.record(location.encode(), mode);
        self.location = location.clone();
        self.state = RouterState::Loading(token);

        surface.clear();
        self.scope = None;
        self.reader = None;
        surface.set_location(&location);
        surface.set_loading(true);

        PendingLoad { token, location }
    }

    /// Re-derives the location from a persisted entry (back/forward, reload).
    pub fn location_changed<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        encoded: &str,
    ) -> PendingLoad {
        let location = Location::decode(encoded);
        self.navigate(surface, location, HistoryMode::Replace)
    }

    /// Applies the outcome of the fetch started for `token`.
    pub fn complete<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        token: TransitionToken,
        outcome: Result<PageContent, LoadError>,
    ) -> Completion {
        if self.state != RouterState::Loading(token) {
            debug!("{token}: superseded, dropping its result");
            return Completion::Stale;
        }
        let completion = if outcome.is_ok() {
            Completion::Rendered
        } else {
            Completion::Failed
        };

        let Rendered {
            block,
            scope,
            reader,
            after_mount,
        } = loaders::render(token.into(), &self.location, outcome);
        let scope_id = scope.id();
        surface.mount(scope_id, block);
        for patch in after_mount {
            surface.apply(scope_id, patch);
        }
        surface.set_loading(false);

        self.scope = Some(scope);
        self.reader = reader;
        self.state = RouterState::Loaded;
        debug!("{token}: {completion:?}");
        completion
    }

    /// Routes an interaction raised inside the block mounted under `scope`.
    pub fn interact<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        scope: ScopeId,
        interaction: &Interaction,
    ) -> Option<Intent> {
        let Some(current) = &self.scope else {
            debug!("{scope}: nothing mounted, ignoring {interaction:?}");
            return None;
        };
        if current.id() != scope {
            debug!("{scope}: released, ignoring {interaction:?}");
            return None;
        }

        match current.dispatch(interaction)? {
            Effect::Navigate(location) => Some(Intent::Navigate(location)),
            Effect::Back => Some(Intent::Back),
            Effect::Patch(patches) => {
                for patch in patches {
                    surface.apply(scope, patch);
                }
                None
            }
            Effect::Reader(action) => {
                let Some(reader) = &mut self.reader else {
                    warn!("{scope}: reader action without a chapter");
                    return None;
                };
                let outcome = reader.handle(action, surface.is_fullscreen());
                for patch in outcome.patches {
                    surface.apply(scope, patch);
                }
                outcome.navigate.map(Intent::Navigate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use komik_core::{ChapterContent, ChapterNavigation, ComicSummary, ComicType};

    use super::*;
    use crate::{
        loaders::Listing, Block, Control, HeadlessSurface, Key, MemoryHistory, Patch,
        ScrollTarget,
    };

    fn router() -> (Router<MemoryHistory>, HeadlessSurface) {
        (Router::new(MemoryHistory::default()), HeadlessSurface::default())
    }

    fn listing(title: &str) -> PageContent {
        PageContent::Catalog(Listing {
            title: title.to_string(),
            comics: vec![ComicSummary {
                slug: "a".to_string(),
                title: "A".to_string(),
                cover: String::new(),
                comic_type: ComicType::Manga,
                rating: None,
                chapter: None,
                date: None,
            }],
        })
    }

    fn chapter(slug: &str, next: Option<&str>) -> PageContent {
        PageContent::Reader(ChapterContent {
            slug: slug.to_string(),
            title: slug.to_string(),
            images: vec!["1.jpg".to_string()],
            navigation: ChapterNavigation {
                prev: None,
                next: next.map(ToString::to_string),
            },
        })
    }

    fn mounted_title(surface: &HeadlessSurface) -> Option<&str> {
        match surface.block()? {
            Block::Catalog(view) => Some(view.title.as_str()),
            Block::Reader(view) => Some(view.title.as_str()),
            Block::Detail(view) => Some(view.detail.title.as_str()),
            Block::Error(view) => Some(view.title.as_str()),
        }
    }

    #[test]
    fn newer_transition_supersedes_older_one() {
        let (mut router, mut surface) = router();
        let first = router.navigate(&mut surface, Location::Latest, HistoryMode::Push);
        let second = router.navigate(&mut surface, Location::Popular, HistoryMode::Push);
        assert!(second.token > first.token);

        assert_eq!(
            router.complete(&mut surface, second.token, Ok(listing("popular"))),
            Completion::Rendered
        );
        assert_eq!(
            router.complete(&mut surface, first.token, Ok(listing("latest"))),
            Completion::Stale
        );
        assert_eq!(mounted_title(&surface), Some("popular"));
        assert_eq!(surface.mounts, 1);
        assert_eq!(router.state(), RouterState::Loaded);
    }

    #[test]
    fn stale_completion_while_loading_keeps_loading() {
        let (mut router, mut surface) = router();
        let first = router.navigate(&mut surface, Location::Latest, HistoryMode::Push);
        let second = router.navigate(&mut surface, Location::Popular, HistoryMode::Push);
        assert_eq!(
            router.complete(&mut surface, first.token, Ok(listing("latest"))),
            Completion::Stale
        );
        assert_eq!(surface.block(), None);
        assert!(surface.loading);
        assert_eq!(router.state(), RouterState::Loading(second.token));
    }

    #[test]
    fn errors_are_a_resting_state() {
        let (mut router, mut surface) = router();
        let pending = router.navigate(
            &mut surface,
            Location::Detail("gone".to_string()),
            HistoryMode::Push,
        );
        let completion = router.complete(
            &mut surface,
            pending.token,
            Err(komik_core::Error::NotFound("comic gone".to_string()).into()),
        );
        assert_eq!(completion, Completion::Failed);
        assert_eq!(router.state(), RouterState::Loaded);
        assert!(!surface.loading);
        assert!(matches!(surface.block(), Some(Block::Error(_))));
    }

    #[test]
    fn navigate_persists_and_clears() {
        let (mut router, mut surface) = router();
        let pending = router.navigate(&mut surface, Location::Latest, HistoryMode::Push);
        router.complete(&mut surface, pending.token, Ok(listing("latest")));
        router.navigate(
            &mut surface,
            Location::Detail("a".to_string()),
            HistoryMode::Push,
        );
        assert_eq!(surface.block(), None);
        assert_eq!(router.scope_id(), None);
        assert_eq!(router.history().entries(), ["latest", "detail/a"]);

        router.location_changed(&mut surface, "latest");
        assert_eq!(router.location(), &Location::Latest);
        assert_eq!(router.history().entries(), ["latest", "latest"]);
    }

    #[test]
    fn interactions_from_released_scopes_are_ignored() {
        let (mut router, mut surface) = router();
        let pending = router.navigate(&mut surface, Location::Latest, HistoryMode::Push);
        router.complete(&mut surface, pending.token, Ok(listing("latest")));
        let old_scope = router.scope_id().unwrap();
        let card = Interaction::Activate(Control::ComicCard("a".to_string()));
        assert_eq!(
            router.interact(&mut surface, old_scope, &card),
            Some(Intent::Navigate(Location::Detail("a".to_string())))
        );

        let pending = router.navigate(&mut surface, Location::Popular, HistoryMode::Push);
        router.complete(&mut surface, pending.token, Ok(listing("popular")));
        assert_eq!(router.interact(&mut surface, old_scope, &card), None);
    }

    #[test]
    fn reader_actions_reach_the_chapter() {
        let (mut router, mut surface) = router();
        let pending = router.navigate(
            &mut surface,
            Location::Reader("ch-1".to_string()),
            HistoryMode::Push,
        );
        router.complete(&mut surface, pending.token, Ok(chapter("ch-1", Some("ch-2"))));
        let scope = router.scope_id().unwrap();
        assert_eq!(
            surface.patches,
            vec![(scope, Patch::ScrollTo(ScrollTarget::Top))]
        );

        assert_eq!(
            router.interact(&mut surface, scope, &Interaction::Key(Key::ArrowRight)),
            Some(Intent::Navigate(Location::Reader("ch-2".to_string())))
        );
        assert_eq!(
            router.interact(&mut surface, scope, &Interaction::Key(Key::ArrowLeft)),
            None
        );
        router.interact(
            &mut surface,
            scope,
            &Interaction::Activate(Control::ToggleFullscreen),
        );
        assert!(surface.fullscreen);
        router.interact(&mut surface, scope, &Interaction::Key(Key::Escape));
        assert!(!surface.fullscreen);
        assert!(router.reader().is_some());

        router.navigate(&mut surface, Location::Home, HistoryMode::Push);
        assert!(router.reader().is_none());
    }

    #[test]
    fn fullscreen_toggle_follows_the_window() {
        let (mut router, mut surface) = router();
        let pending = router.navigate(
            &mut surface,
            Location::Reader("ch-1".to_string()),
            HistoryMode::Push,
        );
        router.complete(&mut surface, pending.token, Ok(chapter("ch-1", None)));
        let scope = router.scope_id().unwrap();
        let toggle = Interaction::Activate(Control::ToggleFullscreen);

        router.interact(&mut surface, scope, &toggle);
        assert!(surface.fullscreen);
        // left through the window manager, not through the reader
        surface.fullscreen = false;
        router.interact(&mut surface, scope, &toggle);
        assert!(surface.fullscreen);
        assert_eq!(
            surface.patches.last(),
            Some(&(scope, Patch::Fullscreen(true)))
        );
    }
}
