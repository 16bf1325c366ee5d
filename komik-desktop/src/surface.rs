use std::{collections::HashSet, rc::Rc};

use dioxus::prelude::*;
use dioxus_desktop::DesktopContext;
use komik_router::{Block, Dropdown, Location, Patch, ScopeId, ScrollTarget, Surface, TypeFilter};
use tracing::{debug, error};

pub type Eval = Rc<dyn Fn(&str) -> Result<UseEval, EvalError>>;

/// Everything the window currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    pub location: Option<Location>,
    pub loading: bool,
    pub mounted: Option<(ScopeId, Block)>,
    pub hidden_cards: HashSet<String>,
    pub filter: TypeFilter,
    pub reading_mode: bool,
    pub dropdown: Option<Dropdown>,
    pub search_input_clears: u64,
}

pub struct DesktopSurface {
    screen: UseRef<Screen>,
    window: DesktopContext,
    eval: Eval,
}

impl DesktopSurface {
    pub fn new(screen: UseRef<Screen>, window: DesktopContext, eval: Eval) -> Self {
        Self {
            screen,
            window,
            eval,
        }
    }

    fn run_script(&self, script: &str) {
        if let Err(err) = (self.eval)(script) {
            error!("script error: {err:?}");
        }
    }
}

impl Surface for DesktopSurface {
    fn clear(&mut self) {
        self.screen.with_mut(|screen| {
            screen.mounted = None;
            screen.hidden_cards.clear();
            screen.filter = TypeFilter::All;
            screen.reading_mode = false;
        });
    }

    fn mount(&mut self, scope: ScopeId, block: Block) {
        debug!("mounting {scope}");
        self.screen
            .with_mut(|screen| screen.mounted = Some((scope, block)));
    }

    fn apply(&mut self, scope: ScopeId, patch: Patch) {
        let mounted = self.screen.read().mounted.as_ref().map(|(id, _)| *id);
        if mounted != Some(scope) {
            debug!("{scope} is not mounted, dropping {patch:?}");
            return;
        }
        match patch {
            Patch::CardVisible { slug, visible } => self.screen.with_mut(|screen| {
                if visible {
                    screen.hidden_cards.remove(&slug);
                } else {
                    screen.hidden_cards.insert(slug);
                }
            }),
            Patch::ActiveFilter(filter) => self.screen.with_mut(|screen| screen.filter = filter),
            Patch::ReadingMode(reading_mode) => self
                .screen
                .with_mut(|screen| screen.reading_mode = reading_mode),
            Patch::Fullscreen(fullscreen) => {
                self.window.set_fullscreen(fullscreen);
                // the window holds the state, only the icon needs a redraw
                self.screen.needs_update();
            }
            Patch::ScrollTo(ScrollTarget::Top) => self.run_script("window.scrollTo({ top: 0 });"),
            Patch::ScrollTo(ScrollTarget::Bottom) => {
                self.run_script("window.scrollTo({ top: document.body.scrollHeight });");
            }
        }
    }

    fn set_location(&mut self, location: &Location) {
        self.window.set_title(&format!("Komik - {location}"));
        self.screen
            .with_mut(|screen| screen.location = Some(location.clone()));
    }

    fn set_loading(&mut self, loading: bool) {
        self.screen.with_mut(|screen| screen.loading = loading);
    }

    fn show_dropdown(&mut self, dropdown: Dropdown) {
        self.screen
            .with_mut(|screen| screen.dropdown = Some(dropdown));
    }

    fn hide_dropdown(&mut self) {
        self.screen.with_mut(|screen| screen.dropdown = None);
    }

    fn clear_search_input(&mut self) {
        self.screen
            .with_mut(|screen| screen.search_input_clears += 1);
    }

    /// Asks the window itself, which may have left fullscreen on its own.
    fn is_fullscreen(&self) -> bool {
        self.window.fullscreen().is_some()
    }
}
